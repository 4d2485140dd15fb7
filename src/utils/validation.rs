//! Centralized input validation for contributions, groups and tuning constants.

/// Maximum number of agents accepted where a dense N×N matrix is built
/// (offset-match calibration and the friend matrix).
pub const MAX_AGENTS: usize = 10_000;

/// Input validation error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Negative contribution from agent {agent}: {amount}")]
    NegativeContribution { agent: usize, amount: f64 },

    #[error("Contribution from agent {agent} is not a finite number: {amount}")]
    NonFiniteContribution { agent: usize, amount: f64 },

    #[error("Group {group} references agent {agent}, but only {num_agents} agents contributed")]
    AgentOutOfRange {
        group: usize,
        agent: usize,
        num_agents: usize,
    },

    #[error("Agent {agent} belongs to no group and cannot be weighted by membership")]
    ZeroMembership { agent: usize },

    #[error("Pairwise scale must be a non-negative number, got {0}")]
    InvalidPairwiseScale(f64),

    #[error("Too many agents: {0} exceeds maximum of {MAX_AGENTS}")]
    TooManyAgents(usize),
}

/// Validate a contribution vector.
///
/// Every formula calls this before touching the data, so a bad vector is
/// rejected with no partial result.
///
/// # Examples
///
/// ```
/// use plural_qf::utils::validation::validate_contributions;
///
/// assert!(validate_contributions(&[10.0, 20.0, 0.0]).is_ok());
/// assert!(validate_contributions(&[10.0, -1.0]).is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::NonFiniteContribution` for NaN or infinite
/// entries, and `ValidationError::NegativeContribution` for negative entries.
pub fn validate_contributions(contributions: &[f64]) -> Result<(), ValidationError> {
    for (agent, &amount) in contributions.iter().enumerate() {
        if !amount.is_finite() {
            return Err(ValidationError::NonFiniteContribution { agent, amount });
        }
        if amount < 0.0 {
            return Err(ValidationError::NegativeContribution { agent, amount });
        }
    }

    Ok(())
}

/// Refuse agent counts whose N×N matrices would exceed [`MAX_AGENTS`].
///
/// # Errors
///
/// Returns `ValidationError::TooManyAgents` if `num_agents > MAX_AGENTS`.
pub fn check_agent_limit(num_agents: usize) -> Result<(), ValidationError> {
    if num_agents > MAX_AGENTS {
        return Err(ValidationError::TooManyAgents(num_agents));
    }
    Ok(())
}

/// Check that every agent referenced by `groups` has a contribution slot.
///
/// # Errors
///
/// Returns `ValidationError::AgentOutOfRange` for the first offending index.
pub fn validate_groups(groups: &[Vec<usize>], num_agents: usize) -> Result<(), ValidationError> {
    for (group, members) in groups.iter().enumerate() {
        if let Some(&agent) = members.iter().find(|&&agent| agent >= num_agents) {
            return Err(ValidationError::AgentOutOfRange {
                group,
                agent,
                num_agents,
            });
        }
    }
    Ok(())
}

/// Validate the pairwise decay constant `M`.
///
/// Zero and positive infinity are allowed; they select the two limiting cases.
///
/// # Errors
///
/// Returns `ValidationError::InvalidPairwiseScale` for NaN or negative values.
pub fn validate_pairwise_scale(scale: f64) -> Result<(), ValidationError> {
    if scale.is_nan() || scale < 0.0 {
        return Err(ValidationError::InvalidPairwiseScale(scale));
    }
    Ok(())
}

/// Return a membership count as a divisor, refusing zero.
///
/// # Errors
///
/// Returns `ValidationError::ZeroMembership` if `count` is zero.
pub fn nonzero_membership(agent: usize, count: usize) -> Result<f64, ValidationError> {
    if count == 0 {
        return Err(ValidationError::ZeroMembership { agent });
    }
    Ok(count_to_f64(count))
}

/// Convert a count to f64 for use in ratios.
///
/// Counts here are agent and group counts, far below 2^53, so the
/// conversion is exact.
#[inline]
#[must_use]
pub fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}
