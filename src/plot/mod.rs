//! Diagnostic chart descriptions.
//!
//! Charts are plain data (series of points plus labels). The ASCII renderer
//! and the TUI both draw from the same descriptions, so the five diagnostic
//! views are defined exactly once.

use crate::app::pipeline::AnalysisOutput;
use crate::domain::{DerivativeFit, LogisticParams};
use crate::models::per_capita_rate;

pub mod ascii;

pub use ascii::*;

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    Line,
    Points,
}

#[derive(Debug, Clone)]
pub struct ChartSeries {
    pub label: String,
    pub style: SeriesStyle,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ChartSeries>,
}

impl Chart {
    /// Bounds over every finite point, or `None` for an empty/degenerate chart.
    pub fn bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        let (mut x0, mut x1) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y0, mut y1) = (f64::INFINITY, f64::NEG_INFINITY);
        for s in &self.series {
            for &(x, y) in &s.points {
                if !(x.is_finite() && y.is_finite()) {
                    continue;
                }
                x0 = x0.min(x);
                x1 = x1.max(x);
                y0 = y0.min(y);
                y1 = y1.max(y);
            }
        }
        if x0.is_finite() && x1 > x0 && y0.is_finite() && y1 > y0 {
            Some(([x0, x1], [y0, y1]))
        } else {
            None
        }
    }
}

/// The five diagnostic charts, in presentation order.
pub fn diagnostic_charts(run: &AnalysisOutput) -> Vec<Chart> {
    vec![
        log_ratio_chart(run),
        log_ratio_fit_chart(run),
        derivative_ratio_chart(run),
        derivative_fit_chart(
            &run.full_derivative,
            "Least squares fit of x'/x = r(1 - x/K)",
        ),
        derivative_fit_chart(
            &run.recent_derivative,
            "Least squares fit of x'/x = r(1 - x/K) (recent data)",
        ),
    ]
}

fn log_ratio_chart(run: &AnalysisOutput) -> Chart {
    Chart {
        title: "Log ratio vs time for different K values".to_string(),
        x_label: format!("years since {}", first_year(run)),
        y_label: "ln((K - x)/x)".to_string(),
        series: run
            .curves
            .iter()
            .map(|c| ChartSeries {
                label: format!("K = {}", c.k),
                style: SeriesStyle::Line,
                points: c.points.clone(),
            })
            .collect(),
    }
}

fn log_ratio_fit_chart(run: &AnalysisOutput) -> Chart {
    let mut series = Vec::new();
    for fit in &run.log_ratio.fits {
        series.push(ChartSeries {
            label: format!("Data (K={})", fit.k),
            style: SeriesStyle::Points,
            points: fit.t.iter().copied().zip(fit.y.iter().copied()).collect(),
        });
        series.push(ChartSeries {
            label: format!("Fit (r={:.5}, K={})", fit.params.r, fit.k),
            style: SeriesStyle::Line,
            points: fit.t.iter().map(|&t| (t, fit.fit.predict(t))).collect(),
        });
    }
    Chart {
        title: "Least squares fit for different K values".to_string(),
        x_label: format!("years since {}", first_year(run)),
        y_label: "ln((K - x)/x)".to_string(),
        series,
    }
}

fn derivative_ratio_chart(run: &AnalysisOutput) -> Chart {
    let d = &run.full_derivative.series;
    Chart {
        title: "x'/x against x".to_string(),
        x_label: "x (millions)".to_string(),
        y_label: "x'/x".to_string(),
        series: vec![ChartSeries {
            label: "x'/x".to_string(),
            style: SeriesStyle::Points,
            points: paired(&d.x, &d.ratio),
        }],
    }
}

fn derivative_fit_chart(fit: &DerivativeFit, title: &str) -> Chart {
    let d = &fit.series;
    Chart {
        title: title.to_string(),
        x_label: "x (millions)".to_string(),
        y_label: "x'/x".to_string(),
        series: vec![
            ChartSeries {
                label: "Data".to_string(),
                style: SeriesStyle::Points,
                points: paired(&d.x, &d.ratio),
            },
            ChartSeries {
                label: fit_label(&fit.params),
                style: SeriesStyle::Line,
                points: d.x.iter().map(|&x| (x, per_capita_rate(&fit.params, x))).collect(),
            },
        ],
    }
}

fn fit_label(params: &LogisticParams) -> String {
    format!("Fit: r={:.5}, K={:.2}", params.r, params.k)
}

fn paired(a: &[f64], b: &[f64]) -> Vec<(f64, f64)> {
    a.iter().copied().zip(b.iter().copied()).collect()
}

fn first_year(run: &AnalysisOutput) -> f64 {
    run.full.times().first().copied().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_analysis;
    use crate::domain::AnalysisConfig;

    #[test]
    fn five_charts_with_expected_series() {
        let run = run_analysis(&AnalysisConfig::default()).unwrap();
        let charts = diagnostic_charts(&run);
        assert_eq!(charts.len(), 5);
        assert_eq!(charts[0].series.len(), 3);
        // Two fitted candidates, data + fit each.
        assert_eq!(charts[1].series.len(), 4);
        assert_eq!(charts[2].series[0].points.len(), 19);
        assert_eq!(charts[4].series[0].points.len(), 3);
        assert_eq!(charts[0].x_label, "years since 1790");
        assert!(charts.iter().all(|c| c.bounds().is_some()));
    }
}
