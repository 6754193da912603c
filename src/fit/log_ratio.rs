//! Log-ratio linearization of the logistic solution.
//!
//! Under the logistic model
//!
//! ```text
//! ln((K - x)/x) = ln((K - x0)/x0) - r t
//! ```
//!
//! so for a fixed candidate `K` the transformed series is a straight line in
//! elapsed time whose slope is `-r`.
//!
//! Two screening rules are kept side by side:
//! - curve plotting admits a candidate whenever `K > x0` and simply leaves out
//!   the points where the log is undefined;
//! - regression either skips candidates that do not exceed every observation
//!   ([`CandidateFilter::ExceedsMaximum`]) or masks points with `x >= K`
//!   ([`CandidateFilter::PointMask`]).

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{
    CandidateFilter, LogRatioCurve, LogRatioFit, LogisticParams, Series, SkippedCandidate,
};
use crate::error::AppError;
use crate::math::fit_line;
use crate::models::log_ratio;

/// Log-ratio fits plus the candidates that were screened out.
#[derive(Debug, Clone, Serialize)]
pub struct LogRatioSelection {
    pub fits: Vec<LogRatioFit>,
    pub skipped: Vec<SkippedCandidate>,
}

/// Transformed curves `ln((K - x)/x)` against elapsed time, one per admitted candidate.
pub fn log_ratio_curves(series: &Series, candidates: &[f64]) -> Result<Vec<LogRatioCurve>, AppError> {
    let x0 = series
        .first_value()
        .ok_or_else(|| AppError::input("Cannot transform an empty series."))?;
    let elapsed = series.elapsed();

    let mut out = Vec::new();
    for &k in candidates {
        if !(k.is_finite() && k > x0) {
            debug!(k, x0, "log-ratio curve candidate not above x0");
            continue;
        }
        let points: Vec<(f64, f64)> = elapsed
            .iter()
            .zip(series.values())
            .filter_map(|(&t, &x)| log_ratio(k, x).map(|y| (t, y)))
            .collect();
        out.push(LogRatioCurve { k, points });
    }
    Ok(out)
}

/// Regress the log ratio on elapsed time for each candidate `K`.
pub fn fit_log_ratios(
    series: &Series,
    candidates: &[f64],
    filter: CandidateFilter,
) -> Result<LogRatioSelection, AppError> {
    let x_max = series
        .max_value()
        .ok_or_else(|| AppError::input("Cannot fit an empty series."))?;
    let elapsed = series.elapsed();

    let mut fits = Vec::new();
    let mut skipped = Vec::new();

    for &k in candidates {
        if !k.is_finite() {
            skipped.push(SkippedCandidate {
                k,
                reason: "candidate is not finite".to_string(),
            });
            continue;
        }
        if filter == CandidateFilter::ExceedsMaximum && k <= x_max {
            info!(k, x_max, "skipping candidate K at or below the observed maximum");
            skipped.push(SkippedCandidate {
                k,
                reason: format!("K <= max observed value {x_max}"),
            });
            continue;
        }

        let (t, y): (Vec<f64>, Vec<f64>) = elapsed
            .iter()
            .zip(series.values())
            .filter_map(|(&t, &x)| log_ratio(k, x).map(|y| (t, y)))
            .unzip();

        match fit_line(&t, &y) {
            Ok(fit) => {
                debug!(k, n = t.len(), slope = fit.slope, "log-ratio fit");
                fits.push(LogRatioFit {
                    k,
                    params: LogisticParams::from_log_ratio(&fit, k),
                    t,
                    y,
                    fit,
                });
            }
            Err(err) => {
                warn!(k, n = t.len(), "skipping candidate K: {err}");
                skipped.push(SkippedCandidate {
                    k,
                    reason: err.message().to_string(),
                });
            }
        }
    }

    Ok(LogRatioSelection { fits, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::full_series;
    use crate::domain::DEFAULT_CANDIDATES;

    #[test]
    fn curves_admit_every_candidate_above_x0() {
        let series = full_series().unwrap();
        let curves = log_ratio_curves(&series, &DEFAULT_CANDIDATES).unwrap();
        assert_eq!(curves.len(), 3);
        // K = 200 loses 1970, 1980, 1990.
        assert_eq!(curves[0].points.len(), 18);
        assert_eq!(curves[1].points.len(), 21);
        assert_eq!(curves[2].points.len(), 21);
        assert!(curves.iter().all(|c| c.points.iter().all(|(_, y)| y.is_finite())));
    }

    #[test]
    fn curves_drop_candidates_below_x0() {
        let series = full_series().unwrap();
        let curves = log_ratio_curves(&series, &[2.0, 300.0]).unwrap();
        assert_eq!(curves.len(), 1);
        assert_eq!(curves[0].k, 300.0);
    }

    #[test]
    fn strict_filter_skips_k_200() {
        let series = full_series().unwrap();
        let sel = fit_log_ratios(&series, &DEFAULT_CANDIDATES, CandidateFilter::ExceedsMaximum).unwrap();
        assert_eq!(sel.skipped.len(), 1);
        assert_eq!(sel.skipped[0].k, 200.0);
        assert_eq!(sel.fits.len(), 2);
        assert!(sel.fits.iter().all(|f| f.n_points() == 21));
    }

    #[test]
    fn k_300_gives_pinned_small_positive_rate() {
        let series = full_series().unwrap();
        let sel = fit_log_ratios(&series, &[300.0], CandidateFilter::ExceedsMaximum).unwrap();
        let fit = &sel.fits[0];
        assert!(sel.skipped.is_empty());
        assert!((fit.fit.slope - -0.027929197618063534).abs() < 1e-12, "slope {}", fit.fit.slope);
        assert!((fit.fit.intercept - 4.225750305500998).abs() < 1e-10);
        assert!(fit.params.r > 0.0 && fit.params.r < 0.05);
        assert_eq!(fit.params.k, 300.0);
    }

    #[test]
    fn k_250_pinned() {
        let series = full_series().unwrap();
        let sel = fit_log_ratios(&series, &[250.0], CandidateFilter::ExceedsMaximum).unwrap();
        assert!((sel.fits[0].fit.slope - -0.03486806660807836).abs() < 1e-12);
        assert!((sel.fits[0].fit.intercept - 4.432810207098511).abs() < 1e-10);
    }

    #[test]
    fn point_mask_keeps_k_200_on_subset() {
        let series = full_series().unwrap();
        let sel = fit_log_ratios(&series, &DEFAULT_CANDIDATES, CandidateFilter::PointMask).unwrap();
        assert!(sel.skipped.is_empty());
        assert_eq!(sel.fits.len(), 3);

        let k200 = &sel.fits[0];
        assert_eq!(k200.n_points(), 18);
        assert!((k200.fit.slope - -0.03244821642793039).abs() < 1e-12);
        assert!((k200.fit.intercept - 3.9811502923313267).abs() < 1e-10);
    }

    #[test]
    fn point_mask_skips_candidate_with_too_few_points() {
        let series = full_series().unwrap();
        let sel = fit_log_ratios(&series, &[5.0], CandidateFilter::PointMask).unwrap();
        // Only 1790 (3.9) is below 5.0.
        assert!(sel.fits.is_empty());
        assert_eq!(sel.skipped.len(), 1);
    }
}
