//! Aggregation queries over a [`crate::domain::UnifiedTable`].
//!
//! Every function here is a pure function of the table and its parameters;
//! none of them mutate the table.
//!
//! - per-year and all-years totals, rankings (`totals`)
//! - the dense year x name pivot and its row totals (`matrix`)

pub mod matrix;
pub mod totals;

pub use matrix::*;
pub use totals::*;
