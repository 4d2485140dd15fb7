//! Offset match.
//!
//! Instead of a fixed per-agent divisor, each agent gets a weight `alpha_i`
//! solved from the overlap structure of the groups. With `T_i` the set of
//! group indices containing agent i, the row for agent r is
//!
//! ```text
//! Σ_c (|T_r ∩ T_c| / |T_r|) · alpha_c = 1
//! ```
//!
//! and the result is `(Σ_i sqrt(alpha_i · c_i))²`.

use tracing::debug;

use crate::core::groups::GroupStructure;
use crate::matching::engine::MatchError;
use crate::utils::linalg::solve;
use crate::utils::validation::{check_agent_limit, count_to_f64, validate_contributions};

/// Weights within this distance below zero are rounding noise and read as zero.
const WEIGHT_TOLERANCE: f64 = 1e-12;

/// Offset match.
///
/// With `add_singletons` every agent not already alone in some group is
/// given a singleton group first, which keeps the calibration system
/// solvable. Without it the system may be singular.
///
/// # Errors
///
/// Returns `MatchError::InvalidInput` for invalid contributions or groups,
/// or (with `add_singletons` off) an agent in no group;
/// `MatchError::SingularSystem` if the calibration system has no unique
/// solution; `MatchError::NegativeWeight` if a contributing agent's solved
/// weight is negative.
pub fn offset_match(
    groups: &[Vec<usize>],
    contributions: &[f64],
    add_singletons: bool,
) -> Result<f64, MatchError> {
    validate_contributions(contributions)?;
    let structure = GroupStructure::new(groups, contributions.len())?;
    let structure = if add_singletons {
        structure.with_singletons()
    } else {
        structure
    };

    let alpha = calibration_weights(&structure)?;
    weighted_match(&alpha, contributions)
}

/// `(Σ_i sqrt(alpha_i · c_i))²`, refusing a clearly negative weight on a
/// positive contribution.
fn weighted_match(alpha: &[f64], contributions: &[f64]) -> Result<f64, MatchError> {
    let mut total = 0.0;
    for (agent, (&weight, &amount)) in alpha.iter().zip(contributions).enumerate() {
        if amount > 0.0 && weight < -WEIGHT_TOLERANCE {
            return Err(MatchError::NegativeWeight { agent, weight });
        }
        total += (weight * amount).max(0.0).sqrt();
    }
    Ok(total * total)
}

/// Solve the calibration system for `alpha`, one weight per agent.
///
/// Row r is normalized by the solving agent's own membership `|T_r|`, i.e.
/// `coeffs[r][c] = |T_r ∩ T_c| / |T_r|`, not by the column agent's.
///
/// # Errors
///
/// Returns `MatchError::InvalidInput` if an agent belongs to no group or
/// there are more than [`MAX_AGENTS`](crate::utils::validation::MAX_AGENTS)
/// agents, and `MatchError::SingularSystem` if the system has no unique
/// solution.
pub fn calibration_weights(structure: &GroupStructure) -> Result<Vec<f64>, MatchError> {
    let n = structure.num_agents();
    check_agent_limit(n)?;

    let mut coeffs = vec![vec![0.0; n]; n];
    for (row, coeff_row) in coeffs.iter_mut().enumerate() {
        let own = structure.divisor(row)?;
        for (col, coeff) in coeff_row.iter_mut().enumerate() {
            *coeff = count_to_f64(structure.shared_groups(row, col)) / own;
        }
    }

    let alpha = solve(&coeffs, &vec![1.0; n]).map_err(MatchError::SingularSystem)?;
    debug!(?alpha, "solved calibration weights");
    Ok(alpha)
}
