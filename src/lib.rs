//! # plural-qf
//!
//! Quadratic-funding matching formulas that account for social connections
//! between contributors.
//!
//! Plain quadratic funding rewards a project for broad support: the match is
//! the square of the sum of square roots of the contributions. That assumes
//! contributors act independently. When contributors share groups (employers,
//! DAOs, communities) their support is correlated, and the formulas here
//! discount it accordingly.
//!
//! `plural-qf` takes the agents' contributions to one project, the groups
//! they belong to, and returns the total matched funding.
//!
//! ## Features
//!
//! - **Cluster match**: Pool contributions per group, discounted by each
//!   agent's membership count (vanilla) or its square (squared)
//! - **Connection-oriented cluster match**: Pairwise group interaction terms
//!   that favour support from unconnected groups
//! - **Offset match**: Per-agent weights solved from group-overlap ratios
//! - **Pairwise matching**: A decaying bonus for every pair of agents
//!
//! ## Example
//!
//! ```rust
//! use plural_qf::{MatchingEngine, Mechanism};
//!
//! // Agents 0 and 1 share a group, as do agents 1 and 2
//! let groups = vec![vec![0, 1], vec![1, 2]];
//! let contributions = [10.0, 20.0, 0.0];
//!
//! let engine = MatchingEngine::new();
//! for mechanism in Mechanism::ALL {
//!     let outcome = engine.compute(mechanism, &groups, &contributions).unwrap();
//!     println!("{}: {:.3}", mechanism.keyword(), outcome.funding);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Mechanism enumeration and group structure statistics
//! - [`matching`]: Matching engine and the five formulas
//! - [`parsing`]: Parsers for list literals given on the command line
//! - [`utils`]: Input validation and the dense linear solver
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::groups::{compute_friend_matrix, compute_memberships, GroupStructure};
pub use crate::core::types::Mechanism;
pub use matching::cluster::{
    connection_oriented_cluster_match, squared_cluster_match, vanilla_cluster_match,
};
pub use matching::engine::{MatchError, MatchOutcome, MatchingConfig, MatchingEngine};
pub use matching::offset::offset_match;
pub use matching::pairwise::pairwise_matching;
pub use utils::validation::{validate_contributions, ValidationError};
