//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the record model (`Sex`, `Record`, `UnifiedTable`)
//! - aggregate building blocks (`NameCount`, `YearTotal`, `YearRange`)
//! - run configuration (`RunConfig`, `IngestMode`, `ViewMode`, `RetryPolicy`)

pub mod types;

pub use types::*;
