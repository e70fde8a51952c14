//! `yob-charts` library crate.
//!
//! The binary (`yob`) is a thin wrapper around this library so that:
//!
//! - ingest and queries are testable without spawning processes
//! - the aggregation layer is reusable apart from any front-end
//! - presentation code stays separate from the data pipeline

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod query;
pub mod report;
pub mod tui;
