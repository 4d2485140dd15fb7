use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::types::Mechanism;
use crate::matching::cluster::{
    connection_oriented_cluster_match, squared_cluster_match, vanilla_cluster_match,
};
use crate::matching::offset::offset_match;
use crate::matching::pairwise::{pairwise_matching, DEFAULT_PAIRWISE_SCALE};
use crate::utils::linalg::SolveError;
use crate::utils::validation::ValidationError;

/// Failure of a single matching computation. No partial result is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("Offset calibration system has no unique solution: {0}")]
    SingularSystem(#[source] SolveError),

    #[error("Calibration weight {weight} for agent {agent} is negative")]
    NegativeWeight { agent: usize, weight: f64 },
}

/// Configuration for the formula-specific options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Offset match: give every agent a singleton group before solving
    pub add_singletons: bool,
    /// Pairwise matching: decay constant `M`
    pub pairwise_scale: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            add_singletons: true,
            pairwise_scale: DEFAULT_PAIRWISE_SCALE,
        }
    }
}

/// Result of one matching computation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchOutcome {
    pub mechanism: Mechanism,
    pub agents: usize,
    pub groups: usize,
    /// Sum of raw contributions
    pub contributed: f64,
    /// Total matched funding (contributions plus subsidy)
    pub funding: f64,
    /// `funding - contributed`
    pub subsidy: f64,
}

/// Dispatches a [`Mechanism`] to its formula with the configured options
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    config: MatchingConfig,
}

impl MatchingEngine {
    /// Create a new matching engine with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new matching engine with custom configuration
    #[must_use]
    pub fn with_config(config: MatchingConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Compute the matched funding for one project.
    ///
    /// `groups` is ignored by [`Mechanism::Pm`].
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidInput` for negative or non-finite
    /// contributions, out-of-range agents or invalid options, and
    /// `MatchError::SingularSystem` / `MatchError::NegativeWeight` when offset
    /// calibration fails.
    pub fn compute(
        &self,
        mechanism: Mechanism,
        groups: &[Vec<usize>],
        contributions: &[f64],
    ) -> Result<MatchOutcome, MatchError> {
        debug!(
            mechanism = mechanism.keyword(),
            agents = contributions.len(),
            groups = groups.len(),
            "computing match"
        );

        let funding = match mechanism {
            Mechanism::Vcm => vanilla_cluster_match(groups, contributions)?,
            Mechanism::Scm => squared_cluster_match(groups, contributions)?,
            Mechanism::Cocm => connection_oriented_cluster_match(groups, contributions)?,
            Mechanism::Om => offset_match(groups, contributions, self.config.add_singletons)?,
            Mechanism::Pm => pairwise_matching(contributions, self.config.pairwise_scale)?,
        };

        let contributed: f64 = contributions.iter().sum();
        debug!(funding, contributed, "match computed");

        Ok(MatchOutcome {
            mechanism,
            agents: contributions.len(),
            groups: if mechanism.uses_groups() {
                groups.len()
            } else {
                0
            },
            contributed,
            funding,
            subsidy: funding - contributed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_groups() -> Vec<Vec<usize>> {
        vec![vec![0, 1], vec![1, 2]]
    }

    #[test]
    fn test_dispatch_matches_direct_calls() {
        let engine = MatchingEngine::new();
        let groups = example_groups();
        let contributions = [10.0, 20.0, 0.0];

        let cocm = engine
            .compute(Mechanism::Cocm, &groups, &contributions)
            .unwrap();
        assert_eq!(
            cocm.funding,
            connection_oriented_cluster_match(&groups, &contributions).unwrap()
        );

        let om = engine.compute(Mechanism::Om, &groups, &contributions).unwrap();
        assert_eq!(om.funding, offset_match(&groups, &contributions, true).unwrap());
    }

    #[test]
    fn test_outcome_totals() {
        let engine = MatchingEngine::new();
        let outcome = engine
            .compute(Mechanism::Vcm, &example_groups(), &[10.0, 20.0, 0.0])
            .unwrap();
        assert_eq!(outcome.agents, 3);
        assert_eq!(outcome.groups, 2);
        assert!((outcome.contributed - 30.0).abs() < 1e-12);
        assert!((outcome.subsidy - (outcome.funding - 30.0)).abs() < 1e-12);
    }

    #[test]
    fn test_pairwise_ignores_groups() {
        let engine = MatchingEngine::new();
        // Group indices far out of range are never looked at
        let outcome = engine
            .compute(Mechanism::Pm, &[vec![99]], &[10.0, 20.0, 0.0])
            .unwrap();
        assert_eq!(outcome.groups, 0);
        assert!((outcome.funding - 42.389_934_309_929_544).abs() < 1e-9);
    }

    #[test]
    fn test_config_options_are_applied() {
        let engine = MatchingEngine::with_config(MatchingConfig {
            add_singletons: false,
            pairwise_scale: 0.0,
        });

        let pm = engine
            .compute(Mechanism::Pm, &[], &[10.0, 20.0, 0.0])
            .unwrap();
        assert!((pm.funding - 30.0).abs() < 1e-12);

        let om = engine.compute(Mechanism::Om, &[vec![0, 1]], &[1.0, 1.0]);
        assert!(matches!(om, Err(MatchError::SingularSystem(_))));
    }

    #[test]
    fn test_negative_contribution_rejected_for_every_mechanism() {
        let engine = MatchingEngine::new();
        for mechanism in Mechanism::ALL {
            let result = engine.compute(mechanism, &example_groups(), &[10.0, -20.0, 0.0]);
            assert!(
                matches!(
                    result,
                    Err(MatchError::InvalidInput(
                        ValidationError::NegativeContribution { agent: 1, .. }
                    ))
                ),
                "{mechanism} accepted a negative contribution"
            );
        }
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: MatchingConfig = serde_json::from_str(r#"{"pairwise_scale": 5.0}"#).unwrap();
        assert!(config.add_singletons);
        assert!((config.pairwise_scale - 5.0).abs() < f64::EPSILON);
    }
}
