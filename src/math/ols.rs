//! Least squares solvers.
//!
//! Two flavours are used in this project:
//!
//! - [`fit_line`]: the closed-form simple regression `v = a + b u`, shared by
//!   every estimator. Two passes (means, then centred sums), O(n).
//! - [`solve_least_squares`]: a general SVD solve for small design matrices,
//!   used by the profile scan where the model is linear in its coefficients
//!   once `K` is fixed.

use nalgebra::{DMatrix, DVector};

use crate::domain::FitResult;
use crate::error::AppError;

/// Fit `v = intercept + slope * u` by ordinary least squares.
///
/// Preconditions (checked, never turned into NaN):
/// - `u` and `v` have the same length, at least 2
/// - all values are finite
/// - `u` is not constant
pub fn fit_line(u: &[f64], v: &[f64]) -> Result<FitResult, AppError> {
    if u.len() != v.len() {
        return Err(AppError::numeric(format!(
            "Regression inputs differ in length ({} vs {}).",
            u.len(),
            v.len()
        )));
    }
    if u.len() < 2 {
        return Err(AppError::numeric(format!(
            "Regression needs at least 2 points (got {}).",
            u.len()
        )));
    }
    if u.iter().chain(v.iter()).any(|x| !x.is_finite()) {
        return Err(AppError::numeric("Regression inputs must be finite."));
    }

    let n = u.len() as f64;
    let u_mean = u.iter().sum::<f64>() / n;
    let v_mean = v.iter().sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (&ui, &vi) in u.iter().zip(v.iter()) {
        let du = ui - u_mean;
        sxy += du * (vi - v_mean);
        sxx += du * du;
    }

    if sxx == 0.0 {
        return Err(AppError::numeric(
            "Regression independent variable is constant (zero variance).",
        ));
    }

    let slope = sxy / sxx;
    Ok(FitResult {
        slope,
        intercept: v_mean - slope * u_mean,
    })
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    // Nalgebra's `QR::solve` expects square systems; SVD handles tall ones.
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_line_recovers_exact_line() {
        let a = 4.25;
        let b = -0.0375;
        let u: Vec<f64> = (0..21).map(|i| i as f64 * 10.0).collect();
        let v: Vec<f64> = u.iter().map(|&t| a + b * t).collect();

        let fit = fit_line(&u, &v).unwrap();
        assert!((fit.slope - b).abs() < 1e-12, "slope {}", fit.slope);
        assert!((fit.intercept - a).abs() < 1e-10, "intercept {}", fit.intercept);
    }

    #[test]
    fn fit_line_rejects_constant_regressor() {
        let err = fit_line(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_NUMERIC);
    }

    #[test]
    fn fit_line_rejects_bad_shapes() {
        assert!(fit_line(&[1.0, 2.0], &[1.0]).is_err());
        assert!(fit_line(&[1.0], &[1.0]).is_err());
        assert!(fit_line(&[1.0, f64::NAN], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn fit_line_matches_svd_solution() {
        let u = [1.0, 2.0, 4.0, 7.0];
        let v = [2.1, 3.9, 8.2, 13.8];
        let line = fit_line(&u, &v).unwrap();

        let x = DMatrix::from_fn(u.len(), 2, |i, j| if j == 0 { 1.0 } else { u[i] });
        let y = DVector::from_row_slice(&v);
        let beta = solve_least_squares(&x, &y).unwrap();

        assert!((beta[0] - line.intercept).abs() < 1e-9);
        assert!((beta[1] - line.slope).abs() < 1e-9);
    }

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }
}
