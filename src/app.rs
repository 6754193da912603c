//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and installs the log subscriber
//! - runs the estimators through the shared pipeline
//! - prints reports, plots, scans, or launches the TUI

use clap::Parser;
use tracing::Level;

use crate::cli::{Command, FilterArgs, GridArgs, PlotArgs, ReportArgs, ScanArgs, SimulateArgs};
use crate::data::{SyntheticConfig, full_series, recent_series};
use crate::domain::{AnalysisConfig, LogisticParams};
use crate::error::AppError;

pub mod pipeline;

use pipeline::ScanGrid;

/// Entry point for the `logfit` binary.
pub fn run() -> Result<(), AppError> {
    // `logfit` with no subcommand behaves like `logfit report`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    init_tracing(cli.verbose);

    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => crate::tui::run(analysis_config(&args)),
        Command::Scan(args) => handle_scan(args),
        Command::Simulate(args) => handle_simulate(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    // Stdout carries the report; logs go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn analysis_config(args: &FilterArgs) -> AnalysisConfig {
    AnalysisConfig {
        filter: args.filter,
        ..AnalysisConfig::default()
    }
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let run = pipeline::run_analysis(&analysis_config(&args.filter))?;
    if args.json {
        println!("{}", crate::report::to_json(&run)?);
    } else {
        print!("{}", crate::report::format_report(&run));
    }
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let run = pipeline::run_analysis(&analysis_config(&args.filter))?;
    let charts = crate::plot::diagnostic_charts(&run);

    let selected = match args.chart {
        Some(n) => charts
            .get(usize::from(n) - 1)
            .cloned()
            .into_iter()
            .collect::<Vec<_>>(),
        None => charts,
    };

    print!("{}", crate::report::format_report(&run));
    println!();
    print!("{}", crate::plot::render_ascii_charts(&selected, args.width, args.height));
    Ok(())
}

fn handle_scan(args: ScanArgs) -> Result<(), AppError> {
    let series = if args.recent { recent_series()? } else { full_series()? };
    let scan = pipeline::run_scan(&series, &scan_grid(&args.grid))?;
    if args.json {
        println!("{}", crate::report::to_json(&scan)?);
    } else {
        print!("{}", crate::report::format_scan(&scan, args.top));
    }
    Ok(())
}

fn handle_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let config = SyntheticConfig {
        params: LogisticParams { r: args.r, k: args.k },
        x0: args.x0,
        t0: 0.0,
        step: args.step,
        points: args.points,
        noise: args.noise,
        seed: args.seed,
    };
    let sim = pipeline::run_simulation(&config, &scan_grid(&args.grid))?;
    if args.json {
        println!("{}", crate::report::to_json(&sim)?);
    } else {
        print!("{}", crate::report::format_simulation(&sim));
    }
    Ok(())
}

fn scan_grid(args: &GridArgs) -> ScanGrid {
    ScanGrid {
        k_min: args.k_min,
        k_max: args.k_max,
        steps: args.steps,
    }
}

/// Rewrite argv so `logfit` defaults to `logfit report`.
///
/// Rules:
/// - `logfit`                      -> `logfit report`
/// - `logfit --json ...`           -> `logfit report --json ...`
/// - `logfit --help/--version/-h`  -> unchanged (show top-level help/version)
/// - `logfit -v ...`               -> unchanged (global flag before a subcommand)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("report".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let has_subcommand = argv[1..].iter().any(|a| {
        matches!(a.as_str(), "report" | "plot" | "tui" | "scan" | "simulate")
    });
    if has_subcommand {
        return argv;
    }

    // Only flags were given: treat them as report flags.
    if arg1.starts_with('-') {
        argv.insert(1, "report".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_report() {
        assert_eq!(rewrite_args(argv(&["logfit"])), argv(&["logfit", "report"]));
    }

    #[test]
    fn leading_flags_become_report_flags() {
        assert_eq!(
            rewrite_args(argv(&["logfit", "--json"])),
            argv(&["logfit", "report", "--json"])
        );
        assert_eq!(
            rewrite_args(argv(&["logfit", "-v", "scan"])),
            argv(&["logfit", "-v", "scan"])
        );
    }

    #[test]
    fn help_and_subcommands_unchanged() {
        assert_eq!(rewrite_args(argv(&["logfit", "--help"])), argv(&["logfit", "--help"]));
        assert_eq!(rewrite_args(argv(&["logfit", "plot"])), argv(&["logfit", "plot"]));
    }
}
