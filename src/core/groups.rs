use std::collections::HashSet;

use tracing::debug;

use crate::utils::validation::{nonzero_membership, validate_groups, ValidationError};

/// Count, for each agent in `0..num_agents`, how many groups contain it.
///
/// Indices outside `0..num_agents` are ignored; use [`GroupStructure::new`]
/// when they should be rejected.
#[must_use]
pub fn compute_memberships(groups: &[Vec<usize>], num_agents: usize) -> Vec<usize> {
    agent_group_sets(groups, num_agents)
        .iter()
        .map(Vec::len)
        .collect()
}

/// Build the N×N matrix whose entry (i, j) counts the groups containing both
/// i and j. The diagonal holds the membership counts.
#[must_use]
pub fn compute_friend_matrix(groups: &[Vec<usize>], num_agents: usize) -> Vec<Vec<usize>> {
    let mut matrix = vec![vec![0; num_agents]; num_agents];
    for group in groups {
        let members = unique_members(group);
        let members: Vec<usize> = members.into_iter().filter(|&a| a < num_agents).collect();
        for &i in &members {
            for &j in &members {
                matrix[i][j] += 1;
            }
        }
    }
    matrix
}

/// Group indices containing each agent, ascending.
fn agent_group_sets(groups: &[Vec<usize>], num_agents: usize) -> Vec<Vec<usize>> {
    let mut sets = vec![Vec::new(); num_agents];
    for (index, group) in groups.iter().enumerate() {
        for agent in unique_members(group) {
            if let Some(set) = sets.get_mut(agent) {
                set.push(index);
            }
        }
    }
    sets
}

/// Members of a group with duplicates removed, first occurrence kept.
fn unique_members(group: &[usize]) -> Vec<usize> {
    let mut seen = HashSet::with_capacity(group.len());
    group.iter().copied().filter(|&agent| seen.insert(agent)).collect()
}

/// Size of the intersection of two ascending index lists.
fn sorted_intersection_len(a: &[usize], b: &[usize]) -> usize {
    let (mut i, mut j, mut count) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}

/// Validated groups for one project plus the statistics derived from them.
///
/// Built once per formula call; nothing is cached across calls.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStructure {
    /// Groups with duplicate members removed, in input order
    groups: Vec<Vec<usize>>,

    /// Number of agents (length of the contribution vector)
    num_agents: usize,

    /// `agent_groups[i]` lists the indices of groups containing agent i
    agent_groups: Vec<Vec<usize>>,
}

impl GroupStructure {
    /// Validate `groups` against `num_agents` and precompute memberships.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::AgentOutOfRange` if a group names an agent
    /// with no contribution.
    pub fn new(groups: &[Vec<usize>], num_agents: usize) -> Result<Self, ValidationError> {
        validate_groups(groups, num_agents)?;

        let groups: Vec<Vec<usize>> = groups.iter().map(|g| unique_members(g)).collect();
        let agent_groups = agent_group_sets(&groups, num_agents);

        debug!(
            agents = num_agents,
            groups = groups.len(),
            "built group structure"
        );

        Ok(Self {
            groups,
            num_agents,
            agent_groups,
        })
    }

    #[must_use]
    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    #[must_use]
    pub fn num_agents(&self) -> usize {
        self.num_agents
    }

    #[must_use]
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Number of groups containing `agent`
    #[must_use]
    pub fn membership(&self, agent: usize) -> usize {
        self.agent_groups.get(agent).map_or(0, Vec::len)
    }

    /// Membership count as a divisor.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::ZeroMembership` if `agent` is in no group.
    pub fn divisor(&self, agent: usize) -> Result<f64, ValidationError> {
        nonzero_membership(agent, self.membership(agent))
    }

    #[must_use]
    pub fn memberships(&self) -> Vec<usize> {
        self.agent_groups.iter().map(Vec::len).collect()
    }

    /// Indices of the groups containing `agent`, ascending
    #[must_use]
    pub fn groups_of(&self, agent: usize) -> &[usize] {
        self.agent_groups.get(agent).map_or(&[][..], Vec::as_slice)
    }

    /// Number of groups containing both `i` and `j`
    #[must_use]
    pub fn shared_groups(&self, i: usize, j: usize) -> usize {
        sorted_intersection_len(self.groups_of(i), self.groups_of(j))
    }

    /// Mask over all agents, true where the agent shares at least one group
    /// with some member of `members`.
    ///
    /// Each group is visited once, so the cost is bounded by the total size
    /// of the groups the members belong to.
    #[must_use]
    pub fn connected_agents(&self, members: &[usize]) -> Vec<bool> {
        let mut connected = vec![false; self.num_agents];
        let mut visited = vec![false; self.groups.len()];
        for &member in members {
            for &group in self.groups_of(member) {
                if std::mem::replace(&mut visited[group], true) {
                    continue;
                }
                for &agent in &self.groups[group] {
                    connected[agent] = true;
                }
            }
        }
        connected
    }

    #[must_use]
    pub fn friend_matrix(&self) -> Vec<Vec<usize>> {
        compute_friend_matrix(&self.groups, self.num_agents)
    }

    /// Whether some group consists of `agent` alone
    #[must_use]
    pub fn has_singleton(&self, agent: usize) -> bool {
        self.groups_of(agent)
            .iter()
            .any(|&g| self.groups[g].len() == 1)
    }

    /// Return a copy in which every agent lacking a singleton group gets one,
    /// appended after the existing groups in agent order.
    #[must_use]
    pub fn with_singletons(&self) -> Self {
        let mut groups = self.groups.clone();
        let mut added = 0;
        for agent in 0..self.num_agents {
            if !self.has_singleton(agent) {
                groups.push(vec![agent]);
                added += 1;
            }
        }
        debug!(added, "appended singleton groups");

        let agent_groups = agent_group_sets(&groups, self.num_agents);
        Self {
            groups,
            num_agents: self.num_agents,
            agent_groups,
        }
    }
}
