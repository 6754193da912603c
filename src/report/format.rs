//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the estimation code stays clean and testable
//! - output changes are localized (and covered by snapshot tests)

use serde::Serialize;

use crate::app::pipeline::{AnalysisOutput, SimulationOutput};
use crate::domain::{LogisticParams, ScanResult};
use crate::error::AppError;

/// The estimator report: log-ratio fits, then full and recent derivative fits.
pub fn format_report(run: &AnalysisOutput) -> String {
    let mut out = String::new();

    for fit in &run.log_ratio.fits {
        out.push_str(&format!(
            "For K = {} million: Estimated slope = -r = {:.5}, Intercept = {:.5}\n",
            fit.k, fit.fit.slope, fit.fit.intercept
        ));
    }
    for skipped in &run.log_ratio.skipped {
        out.push_str(&format!("  (skipped K = {}) {}\n", skipped.k, skipped.reason));
    }

    out.push_str(&format_params("Estimated", &run.full_derivative.params));
    out.push_str(&format_params("New Estimated", &run.recent_derivative.params));

    out
}

fn format_params(label: &str, params: &LogisticParams) -> String {
    format!(
        "{label} r: {:.5}\n{label} K: {:.2} million\n",
        params.r, params.k
    )
}

/// Profile scan summary (best candidate plus a short table around it).
pub fn format_scan(scan: &ScanResult, top_n: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Best K: {:.2} | r: {:.5} | c: {:.5} | SSE: {:.4} | RMSE: {:.4}\n",
        scan.best.k, scan.best.r, scan.best.c, scan.best.sse, scan.best.rmse
    ));

    let mut ranked: Vec<_> = scan.candidates.iter().collect();
    ranked.sort_by(|a, b| a.sse.partial_cmp(&b.sse).unwrap_or(std::cmp::Ordering::Equal));

    out.push('\n');
    out.push_str(&format!("{:>10} {:>10} {:>12} {:>10}\n", "K", "r", "SSE", "RMSE"));
    out.push_str(&format!("{:->10} {:->10} {:->12} {:->10}\n", "", "", "", ""));
    for c in ranked.into_iter().take(top_n) {
        out.push_str(&format!(
            "{:>10.2} {:>10.5} {:>12.4} {:>10.4}\n",
            c.k, c.r, c.sse, c.rmse
        ));
    }
    out
}

/// Synthetic recovery summary: truth vs both estimators.
pub fn format_simulation(sim: &SimulationOutput) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Synthetic logistic: n={} | true r: {:.5} | true K: {:.2}\n",
        sim.series.len(),
        sim.truth.r,
        sim.truth.k
    ));
    out.push_str(&format!(
        "Derivative-ratio  r: {:.5} | K: {:.2}\n",
        sim.derivative.params.r, sim.derivative.params.k
    ));
    out.push_str(&format!(
        "Profile scan      r: {:.5} | K: {:.2} | RMSE: {:.4}\n",
        sim.scan.best.r, sim.scan.best.k, sim.scan.best.rmse
    ));
    out
}

/// Pretty JSON for any serializable output.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::runtime(format!("Failed to serialize output: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_analysis;
    use crate::domain::{AnalysisConfig, CandidateFilter, ScanCandidate};

    #[test]
    fn report_snapshot_default_filter() {
        let run = run_analysis(&AnalysisConfig::default()).unwrap();
        let expected = concat!(
            "For K = 250 million: Estimated slope = -r = -0.03487, Intercept = 4.43281\n",
            "For K = 300 million: Estimated slope = -r = -0.02793, Intercept = 4.22575\n",
            "  (skipped K = 200) K <= max observed value 248.7\n",
            "Estimated r: 0.02913\n",
            "Estimated K: 288.88 million\n",
            "New Estimated r: 0.03594\n",
            "New Estimated K: 307.23 million\n",
        );
        assert_eq!(format_report(&run), expected);
    }

    #[test]
    fn report_point_mask_includes_k_200() {
        let config = AnalysisConfig {
            filter: CandidateFilter::PointMask,
            ..AnalysisConfig::default()
        };
        let run = run_analysis(&config).unwrap();
        let txt = format_report(&run);
        assert!(txt.starts_with(
            "For K = 200 million: Estimated slope = -r = -0.03245, Intercept = 3.98115\n"
        ));
        assert!(!txt.contains("skipped"));
    }

    #[test]
    fn scan_table_is_sorted_by_sse() {
        let cand = |k: f64, sse: f64| ScanCandidate { k, r: 0.03, c: 4.0, sse, rmse: sse };
        let scan = ScanResult {
            best: cand(300.0, 1.0),
            candidates: vec![cand(280.0, 5.0), cand(300.0, 1.0), cand(320.0, 3.0)],
        };
        let txt = format_scan(&scan, 2);
        let rows: Vec<&str> = txt.lines().skip(4).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("300.00"));
        assert!(rows[1].contains("320.00"));
    }

    #[test]
    fn json_contains_params() {
        let run = run_analysis(&AnalysisConfig::default()).unwrap();
        let json = to_json(&run).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        let r = v["full_derivative"]["params"]["r"].as_f64().unwrap();
        assert!((r - 0.029129848182467926).abs() < 1e-12);
        assert_eq!(v["config"]["filter"], "exceeds-maximum");
    }
}
