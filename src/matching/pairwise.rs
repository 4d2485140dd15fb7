//! Pairwise matching.
//!
//! Ignores groups entirely. Every pair of agents earns a bonus of
//! `k_ij · sqrt(c_i · c_j)` with `k_ij = M / (M + sqrt(c_i · c_j))`, so large
//! joint contributions are matched less generously than small ones.

use crate::matching::engine::MatchError;
use crate::utils::validation::{validate_contributions, validate_pairwise_scale};

/// Default decay constant `M`
pub const DEFAULT_PAIRWISE_SCALE: f64 = 100.0;

/// `Σ c_i + Σ_{i<j} k_ij · sqrt(c_i · c_j)`.
///
/// `scale = 0` yields no bonus at all; `scale = ∞` yields classical pairwise
/// quadratic funding (`k_ij = 1`).
///
/// # Errors
///
/// Returns `MatchError::InvalidInput` for invalid contributions or a negative
/// or NaN `scale`.
pub fn pairwise_matching(contributions: &[f64], scale: f64) -> Result<f64, MatchError> {
    validate_contributions(contributions)?;
    validate_pairwise_scale(scale)?;

    let roots: Vec<f64> = contributions.iter().map(|c| c.sqrt()).collect();

    let mut funding: f64 = contributions.iter().sum();
    for (i, &root_i) in roots.iter().enumerate() {
        for &root_j in &roots[i + 1..] {
            let joint = root_i * root_j;
            // k_ij is 0/0 when M = 0 and the pair gave nothing
            if joint == 0.0 {
                continue;
            }
            funding += decay(scale, joint) * joint;
        }
    }

    Ok(funding)
}

#[inline]
fn decay(scale: f64, joint: f64) -> f64 {
    if scale.is_infinite() {
        1.0
    } else {
        scale / (scale + joint)
    }
}
