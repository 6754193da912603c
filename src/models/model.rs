//! Logistic model evaluation.
//!
//! The estimators and renderers rely on three primitive operations:
//! - the log-ratio transform `ln((K - x)/x)` (linear in time under the model)
//! - the per-capita growth rate `x'/x = r (1 - x/K)` (linear in `x`)
//! - the closed-form solution `x(t) = K / (1 + e^{c - r t})`

use crate::domain::LogisticParams;

/// `ln((K - x)/x)`, or `None` when the argument would be non-positive.
pub fn log_ratio(k: f64, x: f64) -> Option<f64> {
    if x > 0.0 && x < k {
        Some(((k - x) / x).ln())
    } else {
        None
    }
}

/// Per-capita growth rate `r (1 - x/K)`.
pub fn per_capita_rate(params: &LogisticParams, x: f64) -> f64 {
    params.r * (1.0 - x / params.k)
}

/// Logistic solution parameterised by the log-ratio intercept `c`.
///
/// Inverting `ln((K - x)/x) = c - r t` gives `x = K / (1 + e^{c - r t})`.
pub fn predict(params: &LogisticParams, c: f64, t: f64) -> f64 {
    params.k / (1.0 + (c - params.r * t).exp())
}

/// Logistic solution anchored at `x(0) = x0`.
pub fn trajectory(params: &LogisticParams, x0: f64, t: f64) -> f64 {
    let c = ((params.k - x0) / x0).ln();
    predict(params, c, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_ratio_domain() {
        assert!(log_ratio(200.0, 205.0).is_none());
        assert!(log_ratio(200.0, 200.0).is_none());
        assert!(log_ratio(200.0, 0.0).is_none());
        assert!(log_ratio(200.0, 100.0).unwrap().abs() < 1e-15);
    }

    #[test]
    fn trajectory_starts_at_x0_and_tends_to_k() {
        let p = LogisticParams { r: 0.03, k: 300.0 };
        assert!((trajectory(&p, 3.9, 0.0) - 3.9).abs() < 1e-12);
        assert!((trajectory(&p, 3.9, 2_000.0) - 300.0).abs() < 1e-6);
    }

    #[test]
    fn trajectory_linearises_under_log_ratio() {
        let p = LogisticParams { r: 0.025, k: 250.0 };
        let x0 = 5.0;
        let c = ((p.k - x0) / x0).ln();
        for t in [0.0, 40.0, 120.0] {
            let y = log_ratio(p.k, trajectory(&p, x0, t)).unwrap();
            assert!((y - (c - p.r * t)).abs() < 1e-9);
        }
    }

    #[test]
    fn per_capita_rate_vanishes_at_capacity() {
        let p = LogisticParams { r: 0.03, k: 300.0 };
        assert!(per_capita_rate(&p, 300.0).abs() < 1e-15);
        assert!((per_capita_rate(&p, 0.0) - 0.03).abs() < 1e-15);
    }
}
