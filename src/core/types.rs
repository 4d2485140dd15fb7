use serde::{Deserialize, Serialize};

/// One of the five matching formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mechanism {
    /// Vanilla cluster match: contributions divided by membership count
    Vcm,
    /// Squared cluster match: contributions divided by membership count squared
    Scm,
    /// Connection-oriented cluster match: pairwise group interaction terms
    Cocm,
    /// Offset match: per-agent weights solved from group overlap ratios
    Om,
    /// Pairwise matching: decaying bonus between every pair of agents
    Pm,
}

impl Mechanism {
    /// All mechanisms, in the order they are listed to users
    pub const ALL: [Mechanism; 5] = [Self::Vcm, Self::Scm, Self::Cocm, Self::Om, Self::Pm];

    /// Short keyword used on the command line
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Vcm => "vcm",
            Self::Scm => "scm",
            Self::Cocm => "cocm",
            Self::Om => "om",
            Self::Pm => "pm",
        }
    }

    /// Full formula name
    #[must_use]
    pub fn formula_name(self) -> &'static str {
        match self {
            Self::Vcm => "vanilla_cluster_match",
            Self::Scm => "squared_cluster_match",
            Self::Cocm => "connection_oriented_cluster_match",
            Self::Om => "offset_match",
            Self::Pm => "pairwise_matching",
        }
    }

    /// Whether the formula reads the group structure at all
    #[must_use]
    pub fn uses_groups(self) -> bool {
        !matches!(self, Self::Pm)
    }
}

impl std::fmt::Display for Mechanism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formula_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown mechanism '{0}' (expected one of: vcm, scm, cocm, om, pm)")]
pub struct UnknownMechanism(pub String);

impl std::str::FromStr for Mechanism {
    type Err = UnknownMechanism;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|m| m.keyword() == needle || m.formula_name() == needle)
            .ok_or_else(|| UnknownMechanism(s.to_string()))
    }
}
