//! Matching engine and the five funding formulas.
//!
//! - [`MatchingEngine`]: Dispatches a [`Mechanism`](crate::core::Mechanism) to its formula
//! - [`cluster`]: Vanilla, squared and connection-oriented cluster match
//! - [`offset`]: Offset match with solved calibration weights
//! - [`pairwise`]: Pairwise matching with a decaying bonus
//!
//! ## Formulas
//!
//! | Keyword | Formula | Uses groups |
//! |---------|---------|-------------|
//! | `vcm`  | `(Σ_g sqrt(Σ_{i∈g} c_i / m_i))²` | yes |
//! | `scm`  | `(Σ_g sqrt(Σ_{i∈g} c_i / m_i²))²` | yes |
//! | `cocm` | `Σ c_i + Σ_{p<q} 2 · sqrt(Σ_{i∈p} K(i,q)/m_i) · sqrt(Σ_{j∈q} K(j,p)/m_j)` | yes |
//! | `om`   | `(Σ_i sqrt(alpha_i · c_i))²` | yes |
//! | `pm`   | `Σ c_i + Σ_{i<j} M/(M + sqrt(c_i c_j)) · sqrt(c_i c_j)` | no |
//!
//! ## Example
//!
//! ```rust
//! use plural_qf::{Mechanism, MatchingEngine};
//!
//! let groups = vec![vec![0, 1], vec![1, 2]];
//! let contributions = [10.0, 20.0, 0.0];
//!
//! let engine = MatchingEngine::new();
//! let outcome = engine.compute(Mechanism::Cocm, &groups, &contributions).unwrap();
//! assert!((outcome.funding - 36.948_688_455).abs() < 1e-6);
//! ```

pub mod cluster;
pub mod engine;
pub mod offset;
pub mod pairwise;

pub use cluster::{connection_oriented_cluster_match, squared_cluster_match, vanilla_cluster_match};
pub use engine::{MatchError, MatchOutcome, MatchingConfig, MatchingEngine};
pub use offset::offset_match;
pub use pairwise::{pairwise_matching, DEFAULT_PAIRWISE_SCALE};
