//! Central-difference numerical differentiation.
//!
//! For an equally spaced sequence with step `h`:
//!
//! ```text
//! x'_i = (x_{i+1} - x_{i-1}) / (2h),   i = 1..n-2
//! ```
//!
//! The stencil is undefined at the two endpoints, so the output has length `n - 2`.

use crate::error::AppError;

/// Interior-point central differences of `values` sampled every `h`.
pub fn central_difference(values: &[f64], h: f64) -> Result<Vec<f64>, AppError> {
    if !(h.is_finite() && h > 0.0) {
        return Err(AppError::numeric(format!("Stencil step must be finite and > 0 (got {h}).")));
    }
    if values.len() < 3 {
        return Err(AppError::numeric(format!(
            "Central differences need at least 3 points (got {}).",
            values.len()
        )));
    }

    Ok(values
        .windows(3)
        .map(|w| (w[2] - w[0]) / (2.0 * h))
        .collect())
}
