//! `logistic-fit` library crate.
//!
//! The binary (`logfit`) is a thin wrapper around this library so that:
//!
//! - estimators are testable without spawning processes
//! - the report, ASCII plots, and TUI share one analysis pipeline
//! - the numeric core (`math`, `models`, `fit`) has no presentation dependencies

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod tui;
