//! Derivative-ratio regression.
//!
//! Dividing the logistic ODE by `x` gives
//!
//! ```text
//! x'/x = r - (r/K) x
//! ```
//!
//! which is linear in `x`. We estimate `x'` with central differences, regress
//! the per-capita growth on `x`, and read off `r = intercept`, `K = -r/slope`.

use tracing::debug;

use crate::domain::{DerivativeFit, DerivativeSeries, LogisticParams, Series};
use crate::error::AppError;
use crate::math::{central_difference, fit_line};

/// Interior central differences of an equally spaced series.
///
/// Values are multiplied by `count_scale` before differencing so `x'` carries
/// raw-count units; `x` in the output stays in the series' own units. The
/// ratio `x'/x` is computed on raw counts and is therefore unit free.
pub fn derivative_ratios(series: &Series, count_scale: f64) -> Result<DerivativeSeries, AppError> {
    if !(count_scale.is_finite() && count_scale > 0.0) {
        return Err(AppError::input(format!(
            "Count scale must be finite and > 0 (got {count_scale})."
        )));
    }
    if series.len() < 3 {
        return Err(AppError::numeric(format!(
            "Derivative ratios need at least 3 points (got {}).",
            series.len()
        )));
    }

    let h = series.step()?;
    let counts: Vec<f64> = series.values().iter().map(|x| x * count_scale).collect();
    let x_prime = central_difference(&counts, h)?;

    let interior = 1..series.len() - 1;
    let t = series.times()[interior.clone()].to_vec();
    let x = series.values()[interior.clone()].to_vec();
    let ratio = x_prime
        .iter()
        .zip(&counts[interior])
        .map(|(d, c)| d / c)
        .collect();

    Ok(DerivativeSeries { t, x, x_prime, ratio })
}

/// Fit `x'/x = r (1 - x/K)` by OLS of the ratio on `x`.
pub fn fit_derivative_ratio(series: &Series, count_scale: f64) -> Result<DerivativeFit, AppError> {
    let derivs = derivative_ratios(series, count_scale)?;
    let fit = fit_line(&derivs.x, &derivs.ratio)?;
    let params = LogisticParams::from_derivative_ratio(&fit);
    debug!(n = derivs.x.len(), r = params.r, k = params.k, "derivative-ratio fit");

    Ok(DerivativeFit {
        series: derivs,
        fit,
        params,
    })
}
