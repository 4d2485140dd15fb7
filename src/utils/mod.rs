//! Shared helpers: input validation and the dense linear solver.

pub mod linalg;
pub mod validation;
