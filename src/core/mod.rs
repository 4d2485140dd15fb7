//! Core data types for group-aware quadratic funding.
//!
//! - [`Mechanism`]: The closed set of matching formulas
//! - [`GroupStructure`]: Validated groups with membership counts, agent→group
//!   index sets and the friend matrix derived from them
//!
//! ## Agents
//!
//! Agents have no identity beyond their position: agent `i` is whoever made
//! `contributions[i]`. A group is a set of such indices. Groups may overlap
//! freely and an agent may belong to none of them.
//!
//! | Statistic | Meaning |
//! |-----------|---------|
//! | membership `m[i]` | number of groups containing i |
//! | friend count `F[i][j]` | number of groups containing both i and j |

pub mod groups;
pub mod types;

pub use groups::GroupStructure;
pub use types::Mechanism;
