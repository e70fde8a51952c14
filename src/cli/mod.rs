//! Command-line parsing for the baby-name chart viewer.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! ingest/query code. Flags that describe the dataset can also come from the
//! environment (or a `.env` file loaded at startup).

use std::path::PathBuf;

use clap::Parser;

use crate::domain::{DEFAULT_TOP_N, IngestMode, ViewMode};

pub mod prompt;

/// Top-level CLI.
#[derive(Debug, Parser, Clone)]
#[command(name = "yob", version, about = "Baby-name charts from per-year count files")]
pub struct Cli {
    /// Directory holding the per-year files (`yob1880.txt`, `yob1881.txt`, ...).
    #[arg(short = 'd', long = "dir", env = "YOB_DIR", default_value = "yob")]
    pub dir: PathBuf,

    /// Names to chart, comma-separated.
    #[arg(
        short = 'n',
        long,
        env = "YOB_NAMES",
        value_delimiter = ',',
        default_value = "Johnny,Natalie,Bob"
    )]
    pub names: Vec<String>,

    /// Year for the per-year charts (1880-2010). Prompts when omitted.
    #[arg(short = 'y', long)]
    pub year: Option<String>,

    /// Give up after this many invalid answers to the year prompt (0 = never).
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Size of the top-name rankings.
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    /// What to do with a malformed year-file.
    #[arg(long, value_enum, default_value_t = IngestMode::Strict)]
    pub ingest: IngestMode,

    /// How to show the charts.
    #[arg(long, value_enum, default_value_t = ViewMode::Tui)]
    pub view: ViewMode,

    /// Log progress at info level (overridden by `RUST_LOG`).
    #[arg(short = 'v', long)]
    pub verbose: bool,
}
