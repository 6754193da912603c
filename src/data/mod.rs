//! Input data: the literal census series and synthetic logistic draws.

pub mod census;
pub mod synthetic;

pub use census::{full_series, recent_series};
pub use synthetic::{SyntheticConfig, SyntheticSeries, generate_logistic};
