//! Terminal plotting without a TUI.

pub mod ascii;

pub use ascii::*;
