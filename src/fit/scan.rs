//! Profile scan over carrying capacity.
//!
//! For a fixed `K` the log-ratio model
//!
//! ```text
//! ln((K - x)/x) = c - r t
//! ```
//!
//! is linear in `(c, r)`, so we solve it by least squares for every `K` on a
//! grid, map the fitted line back to population space with
//! `x̂(t) = K / (1 + e^{c - r t})`, and keep the `K` with the smallest SSE.
//!
//! Grid points are evaluated independently (parallel). Selection is
//! deterministic: minimum SSE, ties broken by grid index.

use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;
use tracing::debug;

use crate::domain::{LogisticParams, ScanCandidate, ScanResult, Series};
use crate::error::AppError;
use crate::math::solve_least_squares;
use crate::models::{log_ratio, predict};

/// Scan `grid` and return every valid candidate plus the best one.
pub fn scan_k(series: &Series, grid: &[f64]) -> Result<ScanResult, AppError> {
    if series.len() < 3 {
        return Err(AppError::numeric(format!(
            "K scan needs at least 3 points (got {}).",
            series.len()
        )));
    }
    if grid.is_empty() {
        return Err(AppError::input("K grid is empty."));
    }

    let t = series.elapsed();
    let x = series.values();

    let mut scored: Vec<(usize, ScanCandidate)> = grid
        .par_iter()
        .enumerate()
        .filter_map(|(idx, &k)| evaluate_candidate(k, &t, x).map(|c| (idx, c)))
        .collect();

    if scored.is_empty() {
        return Err(AppError::numeric(
            "No valid K candidates (every grid point must exceed the observed maximum).",
        ));
    }

    // Parallel collect preserves order, but sort anyway so the tie-break is explicit.
    scored.sort_by_key(|(idx, _)| *idx);

    let mut best = &scored[0];
    for s in &scored[1..] {
        if s.1.sse < best.1.sse {
            best = s;
        }
    }
    let best = best.1.clone();
    debug!(k = best.k, r = best.r, sse = best.sse, n = scored.len(), "K scan done");

    Ok(ScanResult {
        best,
        candidates: scored.into_iter().map(|(_, c)| c).collect(),
    })
}

fn evaluate_candidate(k: f64, t: &[f64], x: &[f64]) -> Option<ScanCandidate> {
    let n = t.len();

    // Build the design matrix [1, -t] and the transformed observations.
    let mut design = DMatrix::<f64>::zeros(n, 2);
    let mut y = DVector::<f64>::zeros(n);
    for i in 0..n {
        design[(i, 0)] = 1.0;
        design[(i, 1)] = -t[i];
        y[i] = log_ratio(k, x[i])?;
    }

    let beta = solve_least_squares(&design, &y)?;
    let params = LogisticParams { r: beta[1], k };
    let c = beta[0];

    let sse: f64 = t
        .iter()
        .zip(x)
        .map(|(&ti, &xi)| {
            let r = xi - predict(&params, c, ti);
            r * r
        })
        .sum();

    if !sse.is_finite() {
        return None;
    }

    Some(ScanCandidate {
        k,
        r: params.r,
        c,
        sse,
        rmse: (sse / n as f64).sqrt(),
    })
}
