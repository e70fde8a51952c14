//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - ingests the year-files
//! - obtains a validated year
//! - runs every chart query
//! - shows the figures (TUI or text)

use std::path::Path;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::Cli;
use crate::cli::prompt::{prompt_for_year_stdin, validate_year};
use crate::domain::{RetryPolicy, RunConfig, ViewMode, YearRange};
use crate::error::{AppError, EXIT_EMPTY};
use crate::io::IngestedTable;

pub mod pipeline;

/// Entry point for the `yob` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` is optional; it only seeds env vars that clap reads.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = run_config_from_args(&cli);
    info!(dir = %config.data_dir.display(), names = ?config.names, "starting");

    let ingested = crate::io::load_table(&config.data_dir, config.ingest_mode)?;
    if !ingested.skipped.is_empty() {
        eprintln!("Skipped {} malformed file(s):", ingested.skipped.len());
        for err in &ingested.skipped {
            eprintln!("  - {err}");
        }
    }
    ensure_chartable(&ingested, &config.data_dir)?;

    let year = match &config.year {
        Some(raw) => validate_year(raw)?,
        None => prompt_for_year_stdin(config.retry)?,
    };
    if !ingested.table.years().contains(&year) {
        warn!(year, "no year-file for the selected year; per-year charts will be empty");
    }

    let charts = pipeline::build_chart_set(&ingested.table, year, &config);

    match config.view {
        ViewMode::Tui => crate::tui::run(&charts),
        ViewMode::Text => {
            println!("{}", crate::report::format_chart_set(&charts));
            Ok(())
        }
    }
}

/// Fail when ingest left nothing to chart, telling "no files" apart from
/// "every file was skipped".
pub fn ensure_chartable(ingested: &IngestedTable, dir: &Path) -> Result<(), AppError> {
    if !ingested.files.is_empty() {
        return Ok(());
    }
    let message = if ingested.skipped.is_empty() {
        format!(
            "No year-files found in '{}' (expected files like yob1880.txt).",
            dir.display()
        )
    } else {
        format!(
            "All {} year-file(s) in '{}' were malformed and skipped; nothing to chart.",
            ingested.skipped.len(),
            dir.display()
        )
    };
    Err(AppError::new(EXIT_EMPTY, message))
}

pub fn run_config_from_args(cli: &Cli) -> RunConfig {
    let names = cli
        .names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();

    RunConfig {
        data_dir: cli.dir.clone(),
        names,
        year: cli.year.clone(),
        retry: RetryPolicy::from_max_attempts(cli.max_attempts),
        top_n: cli.top,
        trend_range: YearRange::default(),
        ingest_mode: cli.ingest,
        view: cli.view,
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (e.g. from tests) is harmless.
    let _ = fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .try_init();
}
