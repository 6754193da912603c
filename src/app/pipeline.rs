//! Shared analysis pipeline used by the report, plot, and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! literal series -> log-ratio curves -> log-ratio fits -> derivative fits
//!
//! The front-ends can then focus on presentation (printing vs charts vs widgets).

use serde::Serialize;
use tracing::info;

use crate::data::{SyntheticConfig, full_series, generate_logistic, recent_series};
use crate::domain::{
    AnalysisConfig, DerivativeFit, LogRatioCurve, LogisticParams, ScanResult, Series,
};
use crate::error::AppError;
use crate::fit::{
    LogRatioSelection, fit_derivative_ratio, fit_log_ratios, k_grid, log_ratio_curves, scan_k,
};

/// All computed outputs of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutput {
    pub config: AnalysisConfig,
    pub full: Series,
    pub recent: Series,
    /// Transformed log-ratio curves per admitted candidate.
    pub curves: Vec<LogRatioCurve>,
    /// Log-ratio regressions.
    pub log_ratio: LogRatioSelection,
    /// Derivative-ratio fit on the full history.
    pub full_derivative: DerivativeFit,
    /// Derivative-ratio fit on the recent subset.
    pub recent_derivative: DerivativeFit,
}

/// Run every estimator on the literal census series.
pub fn run_analysis(config: &AnalysisConfig) -> Result<AnalysisOutput, AppError> {
    run_analysis_on(full_series()?, recent_series()?, config)
}

/// Run every estimator on caller-supplied series.
pub fn run_analysis_on(
    full: Series,
    recent: Series,
    config: &AnalysisConfig,
) -> Result<AnalysisOutput, AppError> {
    info!(
        full = full.len(),
        recent = recent.len(),
        candidates = config.candidates.len(),
        "running logistic analysis"
    );

    let curves = log_ratio_curves(&full, &config.candidates)?;
    let log_ratio = fit_log_ratios(&full, &config.candidates, config.filter)?;
    let full_derivative = fit_derivative_ratio(&full, config.count_scale)?;
    let recent_derivative = fit_derivative_ratio(&recent, config.count_scale)?;

    info!(
        fitted = log_ratio.fits.len(),
        skipped = log_ratio.skipped.len(),
        r_full = full_derivative.params.r,
        k_full = full_derivative.params.k,
        "analysis complete"
    );

    Ok(AnalysisOutput {
        config: config.clone(),
        full,
        recent,
        curves,
        log_ratio,
        full_derivative,
        recent_derivative,
    })
}

/// Bounds of a profile scan grid.
#[derive(Debug, Clone, Copy)]
pub struct ScanGrid {
    pub k_min: Option<f64>,
    pub k_max: Option<f64>,
    pub steps: usize,
}

/// Profile-scan `K` over a grid built above the series maximum.
pub fn run_scan(series: &Series, grid: &ScanGrid) -> Result<ScanResult, AppError> {
    let x_max = series
        .max_value()
        .ok_or_else(|| AppError::input("Cannot scan an empty series."))?;
    let ks = k_grid(x_max, grid.k_min, grid.k_max, grid.steps)?;
    info!(points = ks.len(), k_lo = ks[0], k_hi = ks[ks.len() - 1], "scanning K");
    scan_k(series, &ks)
}

/// Outputs of a synthetic recovery run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutput {
    pub truth: LogisticParams,
    pub series: Series,
    pub derivative: DerivativeFit,
    pub scan: ScanResult,
}

/// Draw a synthetic logistic series and estimate its parameters both ways.
pub fn run_simulation(config: &SyntheticConfig, grid: &ScanGrid) -> Result<SimulationOutput, AppError> {
    let draw = generate_logistic(config)?;
    info!(
        points = draw.series.len(),
        r = draw.truth.r,
        k = draw.truth.k,
        seed = config.seed,
        "generated synthetic series"
    );

    let derivative = fit_derivative_ratio(&draw.series, 1.0)?;
    let scan = run_scan(&draw.series, grid)?;

    Ok(SimulationOutput {
        truth: draw.truth,
        series: draw.series,
        derivative,
        scan,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CandidateFilter;

    #[test]
    fn default_run_produces_every_scenario() {
        let out = run_analysis(&AnalysisConfig::default()).unwrap();
        assert_eq!(out.curves.len(), 3);
        assert_eq!(out.log_ratio.fits.len(), 2);
        assert_eq!(out.log_ratio.skipped.len(), 1);
        assert_eq!(out.full_derivative.series.ratio.len(), 19);
        assert_eq!(out.recent_derivative.series.ratio.len(), 3);
    }

    #[test]
    fn point_mask_run_fits_all_candidates() {
        let config = AnalysisConfig {
            filter: CandidateFilter::PointMask,
            ..AnalysisConfig::default()
        };
        let out = run_analysis(&config).unwrap();
        assert_eq!(out.log_ratio.fits.len(), 3);
        assert!(out.log_ratio.skipped.is_empty());
    }

    #[test]
    fn simulation_recovers_noiseless_parameters() {
        let config = SyntheticConfig {
            params: LogisticParams { r: 0.03, k: 300.0 },
            x0: 4.0,
            t0: 0.0,
            step: 10.0,
            points: 21,
            noise: 0.0,
            seed: 3,
        };
        let grid = ScanGrid {
            k_min: Some(290.0),
            k_max: Some(310.0),
            steps: 21,
        };
        let out = run_simulation(&config, &grid).unwrap();
        assert!((out.scan.best.k - 300.0).abs() < 1e-9);
        assert!((out.scan.best.r - 0.03).abs() < 1e-9);
        assert!(out.derivative.params.r > 0.0);
    }

    #[test]
    fn scan_rejects_grid_below_maximum() {
        let series = full_series().unwrap();
        let grid = ScanGrid {
            k_min: Some(100.0),
            k_max: Some(400.0),
            steps: 10,
        };
        assert!(run_scan(&series, &grid).is_err());
    }
}
