//! Reporting utilities for the text view.

pub mod format;

pub use format::*;
