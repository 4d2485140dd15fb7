//! Cluster-match formulas.
//!
//! Each group is treated as one "voice": its members' contributions are
//! pooled (discounted by how many groups each member belongs to) and the
//! square roots of the pooled amounts are combined quadratically.

use crate::core::groups::GroupStructure;
use crate::matching::engine::MatchError;
use crate::utils::validation::validate_contributions;

/// `(Σ_g sqrt(Σ_{i∈g} c_i / m_i))²`
///
/// # Errors
///
/// Returns `MatchError::InvalidInput` for invalid contributions or groups.
pub fn vanilla_cluster_match(
    groups: &[Vec<usize>],
    contributions: &[f64],
) -> Result<f64, MatchError> {
    validate_contributions(contributions)?;
    let structure = GroupStructure::new(groups, contributions.len())?;
    cluster_match(&structure, contributions, |m| m)
}

/// `(Σ_g sqrt(Σ_{i∈g} c_i / m_i²))²`
///
/// Agents spread across many groups are discounted more steeply than in
/// [`vanilla_cluster_match`].
///
/// # Errors
///
/// Returns `MatchError::InvalidInput` for invalid contributions or groups.
pub fn squared_cluster_match(
    groups: &[Vec<usize>],
    contributions: &[f64],
) -> Result<f64, MatchError> {
    validate_contributions(contributions)?;
    let structure = GroupStructure::new(groups, contributions.len())?;
    cluster_match(&structure, contributions, |m| m * m)
}

fn cluster_match(
    structure: &GroupStructure,
    contributions: &[f64],
    discount: impl Fn(f64) -> f64,
) -> Result<f64, MatchError> {
    let mut total = 0.0;
    for group in structure.groups() {
        let mut pooled = 0.0;
        for &agent in group {
            pooled += contributions[agent] / discount(structure.divisor(agent)?);
        }
        total += pooled.sqrt();
    }
    Ok(total * total)
}

/// Connection-oriented cluster match.
///
/// Starts from the sum of contributions and adds, for every unordered pair of
/// groups `(p, q)`, the term `2 · sqrt(Σ_{i∈p} K(i,q)/m_i) · sqrt(Σ_{j∈q} K(j,p)/m_j)`.
/// `K(i, h)` is `sqrt(c_i)` when agent i shares a group with any member of
/// `h`, and the raw `c_i` otherwise, so support that is corroborated by
/// unconnected groups is rewarded more than support from within one clique.
///
/// # Errors
///
/// Returns `MatchError::InvalidInput` for invalid contributions or groups.
pub fn connection_oriented_cluster_match(
    groups: &[Vec<usize>],
    contributions: &[f64],
) -> Result<f64, MatchError> {
    validate_contributions(contributions)?;
    let structure = GroupStructure::new(groups, contributions.len())?;

    let mut funding: f64 = contributions.iter().sum();

    let groups = structure.groups();
    let reach: Vec<Vec<bool>> = groups
        .iter()
        .map(|members| structure.connected_agents(members))
        .collect();

    for (p_index, p) in groups.iter().enumerate() {
        for (q_index, q) in groups.iter().enumerate().skip(p_index + 1) {
            let left =
                connection_weighted_sum(&structure, contributions, p, &reach[q_index])?.sqrt();
            let right =
                connection_weighted_sum(&structure, contributions, q, &reach[p_index])?.sqrt();
            funding += 2.0 * left * right;
        }
    }

    Ok(funding)
}

/// `Σ_{i∈from} K(i, h) / m_i`, where `connected` is the reach mask of `h`
fn connection_weighted_sum(
    structure: &GroupStructure,
    contributions: &[f64],
    from: &[usize],
    connected: &[bool],
) -> Result<f64, MatchError> {
    let mut sum = 0.0;
    for &agent in from {
        let amount = contributions[agent];
        let weighted = if connected[agent] {
            amount.sqrt()
        } else {
            amount
        };
        sum += weighted / structure.divisor(agent)?;
    }
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::ValidationError;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_vanilla_example() {
        let groups = vec![vec![0, 1], vec![1, 2]];
        assert_close(
            vanilla_cluster_match(&groups, &[10.0, 20.0, 0.0]).unwrap(),
            58.284_271_247_461_916,
        );
    }

    #[test]
    fn test_vanilla_singletons_is_plain_quadratic_funding() {
        let groups = vec![vec![0], vec![1], vec![2]];
        // (2 + 3 + 4)^2
        assert_close(vanilla_cluster_match(&groups, &[4.0, 9.0, 16.0]).unwrap(), 81.0);
    }

    #[test]
    fn test_squared_example() {
        let groups = vec![vec![0, 1], vec![1, 2]];
        assert_close(
            squared_cluster_match(&groups, &[10.0, 20.0, 0.0]).unwrap(),
            37.320_508_075_688_78,
        );
    }

    #[test]
    fn test_squared_discounts_more_than_vanilla() {
        let groups = vec![vec![0, 1], vec![1, 2], vec![0, 2]];
        let contributions = [4.0, 9.0, 16.0];
        let vanilla = vanilla_cluster_match(&groups, &contributions).unwrap();
        let squared = squared_cluster_match(&groups, &contributions).unwrap();
        assert_close(vanilla, 85.512_951_648_914_94);
        assert_close(squared, 42.756_475_824_457_475);
        assert!(squared < vanilla);
    }

    #[test]
    fn test_connection_oriented_example() {
        let groups = vec![vec![0, 1], vec![1, 2]];
        assert_close(
            connection_oriented_cluster_match(&groups, &[10.0, 20.0, 0.0]).unwrap(),
            36.948_688_455_202_316,
        );
    }

    #[test]
    fn test_connection_oriented_disjoint_groups() {
        // No shared members, so K returns raw contributions
        let groups = vec![vec![0, 1], vec![2, 3]];
        assert_close(
            connection_oriented_cluster_match(&groups, &[4.0, 9.0, 16.0, 25.0]).unwrap(),
            100.173_585_522_460_77,
        );
    }

    #[test]
    fn test_connection_oriented_single_group_has_no_interaction() {
        let groups = vec![vec![0, 1, 2]];
        assert_close(
            connection_oriented_cluster_match(&groups, &[4.0, 9.0, 16.0]).unwrap(),
            29.0,
        );
        assert_close(connection_oriented_cluster_match(&[], &[4.0, 9.0]).unwrap(), 13.0);
    }

    #[test]
    fn test_connection_oriented_equals_vanilla_for_singletons() {
        let groups = vec![vec![0], vec![1], vec![2]];
        let contributions = [4.0, 9.0, 16.0];
        assert_close(
            connection_oriented_cluster_match(&groups, &contributions).unwrap(),
            vanilla_cluster_match(&groups, &contributions).unwrap(),
        );
    }

    #[test]
    fn test_connection_oriented_chain() {
        // Groups 0 and 2 share no member, but agent 1 reaches group 2 via agent 2
        let groups = vec![vec![0, 1], vec![1, 2], vec![2, 3]];
        assert_close(
            connection_oriented_cluster_match(&groups, &[4.0, 9.0, 16.0, 25.0]).unwrap(),
            95.271_610_150_519_54,
        );
    }

    #[test]
    fn test_more_agents_than_dense_limit() {
        let members: Vec<usize> = (0..10_001).collect();
        let contributions = vec![1.0; 10_001];
        assert_close(
            vanilla_cluster_match(&[members], &contributions).unwrap(),
            10_001.0,
        );
    }

    #[test]
    fn test_empty_group_contributes_nothing() {
        let groups = vec![vec![0], vec![]];
        assert_close(vanilla_cluster_match(&groups, &[9.0]).unwrap(), 9.0);
    }

    #[test]
    fn test_agent_out_of_range() {
        let result = vanilla_cluster_match(&[vec![0, 3]], &[1.0, 1.0]);
        assert!(matches!(
            result,
            Err(MatchError::InvalidInput(ValidationError::AgentOutOfRange {
                agent: 3,
                ..
            }))
        ));
    }

    #[test]
    fn test_negative_contribution() {
        let groups = vec![vec![0, 1]];
        for result in [
            vanilla_cluster_match(&groups, &[1.0, -1.0]),
            squared_cluster_match(&groups, &[1.0, -1.0]),
            connection_oriented_cluster_match(&groups, &[1.0, -1.0]),
        ] {
            assert!(matches!(
                result,
                Err(MatchError::InvalidInput(
                    ValidationError::NegativeContribution { agent: 1, .. }
                ))
            ));
        }
    }
}
