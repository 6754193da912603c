//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the observation container (`Series`)
//! - regression and parameter outputs (`FitResult`, `LogisticParams`)
//! - per-estimator result records and the literal run configuration

pub mod types;

pub use types::*;
