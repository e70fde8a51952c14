//! Input helpers.
//!
//! - year-file discovery, parsing, and concatenation (`ingest`)

pub mod ingest;

pub use ingest::*;
