//! Command-line parsing for the logistic growth estimator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the estimation code. Defaults reproduce the literal analysis.

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::CandidateFilter;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "logfit", version, about = "Logistic growth estimation for U.S. census population")]
pub struct Cli {
    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the log-ratio and derivative-ratio estimates (default).
    Report(ReportArgs),
    /// Render the five diagnostic charts as ASCII plots.
    Plot(PlotArgs),
    /// Browse the diagnostic charts in an interactive terminal UI.
    Tui(FilterArgs),
    /// Profile-scan the carrying capacity over a grid of K values.
    Scan(ScanArgs),
    /// Estimate parameters from a synthetic logistic series with known truth.
    Simulate(SimulateArgs),
}

/// Log-ratio candidate screening.
#[derive(Debug, Args, Clone)]
pub struct FilterArgs {
    /// How candidates at or below observed values are handled.
    #[arg(long, value_enum, default_value_t = CandidateFilter::ExceedsMaximum)]
    pub filter: CandidateFilter,
}

#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Print the full analysis as JSON instead of text lines.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Render a single chart (1-5) instead of all five.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub chart: Option<u8>,
}

/// `K` grid options shared by `scan` and `simulate`.
#[derive(Debug, Args, Clone)]
pub struct GridArgs {
    /// Lowest K on the grid (default: 1.05 x the series maximum).
    #[arg(long)]
    pub k_min: Option<f64>,

    /// Highest K on the grid (default: 4 x the series maximum).
    #[arg(long)]
    pub k_max: Option<f64>,

    /// Number of grid points.
    #[arg(long, default_value_t = 200)]
    pub steps: usize,
}

#[derive(Debug, Args, Clone)]
pub struct ScanArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    /// Scan the 1950-1990 subset instead of the full history.
    #[arg(long)]
    pub recent: bool,

    /// Rows of the ranked candidate table.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Print the scan as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    /// True intrinsic growth rate.
    #[arg(long, default_value_t = 0.03)]
    pub r: f64,

    /// True carrying capacity.
    #[arg(long, default_value_t = 300.0)]
    pub k: f64,

    /// Value at the first sample.
    #[arg(long, default_value_t = 3.9)]
    pub x0: f64,

    /// Number of samples.
    #[arg(long, default_value_t = 21)]
    pub points: usize,

    /// Sampling step.
    #[arg(long, default_value_t = 10.0)]
    pub step: f64,

    /// Relative (log-scale) noise level.
    #[arg(long, default_value_t = 0.02)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}
