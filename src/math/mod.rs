//! Mathematical utilities: least squares and finite differences.

pub mod diff;
pub mod ols;

pub use diff::*;
pub use ols::*;
