//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during estimation
//! - printed as JSON on stdout (`logfit report --json`)
//! - turned into chart descriptions for the ASCII and TUI renderers

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// An ordered sequence of `(t, x)` observations.
///
/// Invariants (checked by [`Series::new`]):
/// - `t` and `x` have the same length
/// - `t` is strictly increasing
/// - every `x` is finite and `> 0`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    t: Vec<f64>,
    x: Vec<f64>,
}

impl Series {
    pub fn new(t: Vec<f64>, x: Vec<f64>) -> Result<Self, AppError> {
        if t.len() != x.len() {
            return Err(AppError::input(format!(
                "Series length mismatch: {} times vs {} values.",
                t.len(),
                x.len()
            )));
        }
        if t.iter().any(|v| !v.is_finite()) {
            return Err(AppError::input("Series times must be finite."));
        }
        if let Some(w) = t.windows(2).find(|w| w[1] <= w[0]) {
            return Err(AppError::input(format!(
                "Series times must be strictly increasing (got {} then {}).",
                w[0], w[1]
            )));
        }
        if let Some(v) = x.iter().find(|v| !(v.is_finite() && **v > 0.0)) {
            return Err(AppError::input(format!(
                "Series values must be finite and positive (got {v})."
            )));
        }
        Ok(Self { t, x })
    }

    /// Build a series from `(t, x)` pairs.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, AppError> {
        let (t, x) = pairs.iter().copied().unzip();
        Self::new(t, x)
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.t
    }

    pub fn values(&self) -> &[f64] {
        &self.x
    }

    /// First observed value (`x0`), if any.
    pub fn first_value(&self) -> Option<f64> {
        self.x.first().copied()
    }

    /// Largest observed value, if any.
    pub fn max_value(&self) -> Option<f64> {
        self.x.iter().copied().reduce(f64::max)
    }

    /// Time elapsed since the first observation (`t_i - t_0`).
    pub fn elapsed(&self) -> Vec<f64> {
        let Some(&t0) = self.t.first() else {
            return Vec::new();
        };
        self.t.iter().map(|&t| t - t0).collect()
    }

    /// Sampling step of an equally spaced series.
    ///
    /// Fails when the series has fewer than two points or when any gap differs
    /// from the first one by more than a relative `1e-9`.
    pub fn step(&self) -> Result<f64, AppError> {
        if self.t.len() < 2 {
            return Err(AppError::numeric("A sampling step needs at least two points."));
        }
        let h = self.t[1] - self.t[0];
        for w in self.t.windows(2) {
            let gap = w[1] - w[0];
            if (gap - h).abs() > 1e-9 * h.abs().max(1.0) {
                return Err(AppError::numeric(format!(
                    "Series is not equally spaced (step {h} vs gap {gap} at t={}).",
                    w[0]
                )));
            }
        }
        Ok(h)
    }
}

/// How log-ratio candidates are screened before regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateFilter {
    /// Skip any candidate `K` that does not exceed every observed value.
    ExceedsMaximum,
    /// Keep the candidate but regress only on points with `x < K`.
    PointMask,
}

/// Ordinary least squares line `v = intercept + slope * u`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub slope: f64,
    pub intercept: f64,
}

impl FitResult {
    pub fn predict(&self, u: f64) -> f64 {
        self.intercept + self.slope * u
    }
}

/// Logistic growth parameters: intrinsic rate `r` and carrying capacity `k`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogisticParams {
    pub r: f64,
    pub k: f64,
}

impl LogisticParams {
    /// Log-ratio form: `r = -slope`, `K` is the candidate that produced the fit.
    pub fn from_log_ratio(fit: &FitResult, k: f64) -> Self {
        Self { r: -fit.slope, k }
    }

    /// Derivative-ratio form: `r = intercept`, `K = -r / slope`.
    pub fn from_derivative_ratio(fit: &FitResult) -> Self {
        let r = fit.intercept;
        Self { r, k: -r / fit.slope }
    }
}

/// The transformed curve `ln((K - x)/x)` for one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRatioCurve {
    pub k: f64,
    /// `(elapsed time, log ratio)` for every point where the ratio is defined.
    pub points: Vec<(f64, f64)>,
}

/// OLS of the log ratio against elapsed time for one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRatioFit {
    pub k: f64,
    pub t: Vec<f64>,
    pub y: Vec<f64>,
    pub fit: FitResult,
    pub params: LogisticParams,
}

impl LogRatioFit {
    pub fn n_points(&self) -> usize {
        self.t.len()
    }
}

/// A candidate `K` that was excluded before evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedCandidate {
    pub k: f64,
    pub reason: String,
}

/// Interior-point central differences of a series.
///
/// All vectors have length `n - 2` and are aligned index-for-index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivativeSeries {
    pub t: Vec<f64>,
    /// Interior values in reporting units (millions).
    pub x: Vec<f64>,
    /// Derivative in raw counts per unit time.
    pub x_prime: Vec<f64>,
    /// Per-capita growth `x' / x` (unit free).
    pub ratio: Vec<f64>,
}

/// OLS of `x'/x` against `x`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivativeFit {
    pub series: DerivativeSeries,
    pub fit: FitResult,
    pub params: LogisticParams,
}

/// One evaluated point of the profile `K` scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanCandidate {
    pub k: f64,
    pub r: f64,
    /// Log-ratio intercept `c = ln((K - x0)/x0)` as fitted.
    pub c: f64,
    /// Sum of squared errors in population space.
    pub sse: f64,
    pub rmse: f64,
}

/// Profile scan output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub best: ScanCandidate,
    pub candidates: Vec<ScanCandidate>,
}

/// Immutable constants that drive a run.
///
/// Built once at startup; the defaults reproduce the literal analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Candidate carrying capacities (millions) for the log-ratio estimator.
    pub candidates: Vec<f64>,
    /// Candidate screening rule for the log-ratio regression.
    pub filter: CandidateFilter,
    /// Factor converting reporting units to raw counts before differencing.
    pub count_scale: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            candidates: DEFAULT_CANDIDATES.to_vec(),
            filter: CandidateFilter::ExceedsMaximum,
            count_scale: MILLION,
        }
    }
}

/// Candidate carrying capacities (millions).
pub const DEFAULT_CANDIDATES: [f64; 3] = [200.0, 250.0, 300.0];

/// Millions to individuals.
pub const MILLION: f64 = 1e6;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_rejects_non_increasing_times() {
        let err = Series::new(vec![0.0, 1.0, 1.0], vec![1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }

    #[test]
    fn series_rejects_non_positive_values() {
        assert!(Series::new(vec![0.0, 1.0], vec![1.0, 0.0]).is_err());
        assert!(Series::new(vec![0.0, 1.0], vec![1.0, f64::NAN]).is_err());
    }

    #[test]
    fn series_rejects_length_mismatch() {
        assert!(Series::new(vec![0.0, 1.0], vec![1.0]).is_err());
    }

    #[test]
    fn step_detects_uneven_spacing() {
        let even = Series::from_pairs(&[(0.0, 1.0), (5.0, 2.0), (10.0, 3.0)]).unwrap();
        assert!((even.step().unwrap() - 5.0).abs() < 1e-12);

        let uneven = Series::from_pairs(&[(0.0, 1.0), (5.0, 2.0), (11.0, 3.0)]).unwrap();
        assert!(uneven.step().is_err());
    }

    #[test]
    fn elapsed_starts_at_zero() {
        let s = Series::from_pairs(&[(1790.0, 1.0), (1800.0, 2.0)]).unwrap();
        assert_eq!(s.elapsed(), vec![0.0, 10.0]);
    }

    #[test]
    fn derivative_ratio_mapping() {
        let fit = FitResult { slope: -0.0001, intercept: 0.03 };
        let p = LogisticParams::from_derivative_ratio(&fit);
        assert!((p.r - 0.03).abs() < 1e-15);
        assert!((p.k - 300.0).abs() < 1e-9);

        let p = LogisticParams::from_log_ratio(&FitResult { slope: -0.02, intercept: 4.0 }, 250.0);
        assert!((p.r - 0.02).abs() < 1e-15);
        assert_eq!(p.k, 250.0);
    }
}
