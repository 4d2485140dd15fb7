//! Dense linear-system solver.
//!
//! Gaussian elimination with partial pivoting. Systems here are at most
//! [`MAX_AGENTS`](crate::utils::validation::MAX_AGENTS) square and solved
//! once per call, so no factorisation is cached.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("Coefficient matrix is singular (pivot {pivot:e} in column {column})")]
    Singular { column: usize, pivot: f64 },

    #[error("Dimension mismatch: {rows}x{cols} matrix with right-hand side of length {rhs}")]
    DimensionMismatch { rows: usize, cols: usize, rhs: usize },
}

/// Solve `a · x = b` for `x`.
///
/// A pivot whose magnitude is below `n · ε · max|a_ij|` is treated as zero.
///
/// # Errors
///
/// Returns `SolveError::DimensionMismatch` if `a` is not square or does not
/// match `b`, and `SolveError::Singular` if the system has no unique solution.
pub fn solve(a: &[Vec<f64>], b: &[f64]) -> Result<Vec<f64>, SolveError> {
    let n = b.len();
    if a.len() != n {
        return Err(SolveError::DimensionMismatch {
            rows: a.len(),
            cols: a.first().map_or(0, Vec::len),
            rhs: n,
        });
    }
    if let Some(row) = a.iter().find(|row| row.len() != n) {
        return Err(SolveError::DimensionMismatch {
            rows: n,
            cols: row.len(),
            rhs: n,
        });
    }

    // Augmented matrix [a | b]
    let mut m: Vec<Vec<f64>> = a
        .iter()
        .zip(b)
        .map(|(row, &rhs)| {
            let mut augmented = row.clone();
            augmented.push(rhs);
            augmented
        })
        .collect();

    let scale = a
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));
    #[allow(clippy::cast_precision_loss)]
    let tolerance = (n as f64) * f64::EPSILON * scale;

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&r1, &r2| {
                m[r1][col]
                    .abs()
                    .partial_cmp(&m[r2][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);

        let pivot = m[pivot_row][col];
        if pivot.abs() <= tolerance || !pivot.is_finite() {
            return Err(SolveError::Singular { column: col, pivot });
        }
        m.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = m[row][col] / m[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..=n {
                m[row][k] -= factor * m[col][k];
            }
        }
    }

    // Back substitution
    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| m[row][k] * x[k]).sum();
        x[row] = (m[row][n] - tail) / m[row][row];
    }

    Ok(x)
}
