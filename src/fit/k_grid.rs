//! Carrying-capacity grid generation.
//!
//! The profile scan evaluates a deterministic grid of `K` values. Every grid
//! point must lie strictly above the largest observation, otherwise the
//! log-ratio transform is undefined for some points.

use crate::error::AppError;

/// Generate `steps` evenly spaced points between `min` and `max` (inclusive).
pub fn lin_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    if !(min.is_finite() && max.is_finite() && max > min) {
        return Err(AppError::input(format!(
            "Invalid K range: min={min}, max={max} (must be finite and max>min)."
        )));
    }
    if steps < 2 {
        return Err(AppError::input("K grid steps must be >= 2."));
    }

    let step = (max - min) / (steps as f64 - 1.0);
    Ok((0..steps).map(|i| min + step * i as f64).collect())
}

/// `K` grid for a series whose largest value is `x_max`.
///
/// The lower end defaults to `1.05 * x_max` and the upper end to `4 * x_max`.
/// An explicit lower bound at or below `x_max` is rejected.
pub fn k_grid(
    x_max: f64,
    min: Option<f64>,
    max: Option<f64>,
    steps: usize,
) -> Result<Vec<f64>, AppError> {
    if !(x_max.is_finite() && x_max > 0.0) {
        return Err(AppError::input(format!("Invalid series maximum: {x_max}.")));
    }
    let lo = min.unwrap_or(1.05 * x_max);
    let hi = max.unwrap_or(4.0 * x_max);
    if lo <= x_max {
        return Err(AppError::input(format!(
            "K grid must start above the observed maximum {x_max} (got {lo})."
        )));
    }
    lin_space(lo, hi, steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lin_space_includes_endpoints() {
        let v = lin_space(250.0, 500.0, 6).unwrap();
        assert_eq!(v.len(), 6);
        assert!((v[0] - 250.0).abs() < 1e-12);
        assert!((v[5] - 500.0).abs() < 1e-9);
        assert!((v[1] - 300.0).abs() < 1e-9);
    }

    #[test]
    fn grid_stays_above_maximum() {
        let grid = k_grid(248.7, None, None, 50).unwrap();
        assert!(grid.iter().all(|&k| k > 248.7));
        assert!(k_grid(248.7, Some(200.0), None, 10).is_err());
    }
}
