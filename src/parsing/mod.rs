//! Parsers for the textual inputs accepted on the command line.
//!
//! Groups and contributions are written as list literals:
//!
//! | Input | Example | Parsed as |
//! |-------|---------|-----------|
//! | groups | `[[0, 1], [1, 2]]` | `Vec<Vec<usize>>` |
//! | contributions | `[10, 20.5, 0]` | `Vec<f64>` |
//! | flag | `True` / `false` | `bool` |
//!
//! Literals are JSON arrays; Python tuple parentheses and trailing commas
//! are also accepted.

pub mod literal;
