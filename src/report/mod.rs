//! Reporting: the printed estimator lines, scan tables, and JSON output.

pub mod format;

pub use format::*;
