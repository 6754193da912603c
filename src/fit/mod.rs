//! Logistic parameter estimation.
//!
//! Responsibilities:
//!
//! - log-ratio curves and regressions over candidate `K` values
//! - central-difference derivative ratios and their regression
//! - `K` grids and the profile scan over them (parallel)

pub mod derivative;
pub mod k_grid;
pub mod log_ratio;
pub mod scan;

pub use derivative::*;
pub use k_grid::*;
pub use log_ratio::*;
pub use scan::*;
