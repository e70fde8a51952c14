//! Shared domain types.
//!
//! These types are intentionally kept small and owned so they can be built
//! once during ingest and handed by reference to every query.

use std::collections::BTreeSet;
use std::fmt;
use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::Deserialize;

/// First year accepted from the user and the start of the default trend range.
pub const MIN_YEAR: i32 = 1880;
/// Last year accepted from the user and the end of the default trend range.
pub const MAX_YEAR: i32 = 2010;

/// Names charted when none are configured.
pub const DEFAULT_NAMES: [&str; 3] = ["Johnny", "Natalie", "Bob"];

/// Size of the top-N rankings.
pub const DEFAULT_TOP_N: usize = 10;

/// Sex column of a year-file (`F` / `M`).
///
/// Deserializes from the exact codes only; `m` or `X` are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum Sex {
    F,
    M,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::F, Sex::M];

    pub fn code(self) -> &'static str {
        match self {
            Sex::F => "F",
            Sex::M => "M",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One `(name, sex, count)` observation for a given year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Record {
    pub name: String,
    pub sex: Sex,
    pub count: u64,
    pub year: i32,
}

impl Record {
    pub fn new(name: impl Into<String>, sex: Sex, count: u64, year: i32) -> Self {
        Self {
            name: name.into(),
            sex,
            count,
            year,
        }
    }
}

/// All records from every ingested year-file.
///
/// Rows are never merged: duplicate `(name, sex, year)` rows stay separate and
/// are summed by the queries that group on them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnifiedTable {
    records: Vec<Record>,
    years: BTreeSet<i32>,
}

impl UnifiedTable {
    /// Build a table from already-tagged records.
    ///
    /// The year set is derived from the records themselves; use
    /// [`UnifiedTable::with_years`] when a year-file may have been empty.
    pub fn from_records(records: Vec<Record>) -> Self {
        let years = records.iter().map(|r| r.year).collect();
        Self { records, years }
    }

    pub fn with_years(records: Vec<Record>, years: BTreeSet<i32>) -> Self {
        let mut years = years;
        years.extend(records.iter().map(|r| r.year));
        Self { records, years }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Years for which a source file was ingested.
    pub fn years(&self) -> &BTreeSet<i32> {
        &self.years
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_count(&self) -> u64 {
        self.records.iter().map(|r| r.count).sum()
    }
}

/// Inclusive span of years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn contains(self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }

    pub fn iter(self) -> std::ops::RangeInclusive<i32> {
        self.start..=self.end
    }

    /// Number of years in the span (0 when `end < start`).
    pub fn len(self) -> usize {
        if self.end < self.start {
            0
        } else {
            (self.end - self.start) as usize + 1
        }
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::new(MIN_YEAR, MAX_YEAR)
    }
}

/// A name with its summed count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCount {
    pub name: String,
    pub total: u64,
}

impl NameCount {
    pub fn new(name: impl Into<String>, total: u64) -> Self {
        Self {
            name: name.into(),
            total,
        }
    }
}

/// A year with its summed count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearTotal {
    pub year: i32,
    pub total: u64,
}

/// How ingest reacts to a bad year-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum IngestMode {
    /// Any bad file aborts ingest.
    #[default]
    Strict,
    /// Bad files are skipped and reported; the rest are kept.
    Lenient,
}

/// Where figures are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ViewMode {
    /// Full-screen terminal UI, one page per figure.
    #[default]
    Tui,
    /// Printed tables and ASCII charts.
    Text,
}

/// How many times the year prompt may be answered before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    #[default]
    Unbounded,
    Bounded(NonZeroU32),
}

impl RetryPolicy {
    pub fn from_max_attempts(max: Option<u32>) -> Self {
        match max.and_then(NonZeroU32::new) {
            Some(n) => RetryPolicy::Bounded(n),
            None => RetryPolicy::Unbounded,
        }
    }

    /// Whether another attempt is allowed after `used` attempts.
    pub fn allows(self, used: u32) -> bool {
        match self {
            RetryPolicy::Unbounded => true,
            RetryPolicy::Bounded(n) => used < n.get(),
        }
    }
}

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub data_dir: PathBuf,
    pub names: Vec<String>,
    pub year: Option<String>,
    pub retry: RetryPolicy,
    pub top_n: usize,
    pub trend_range: YearRange,
    pub ingest_mode: IngestMode,
    pub view: ViewMode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("yob"),
            names: DEFAULT_NAMES.iter().map(|s| s.to_string()).collect(),
            year: None,
            retry: RetryPolicy::Unbounded,
            top_n: DEFAULT_TOP_N,
            trend_range: YearRange::default(),
            ingest_mode: IngestMode::Strict,
            view: ViewMode::Tui,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sex_displays_its_code() {
        assert_eq!(Sex::F.to_string(), "F");
        assert_eq!(Sex::ALL.map(Sex::code), ["F", "M"]);
    }

    #[test]
    fn table_years_include_empty_files() {
        let table = UnifiedTable::with_years(
            vec![Record::new("Mary", Sex::F, 7, 1900)],
            BTreeSet::from([1900, 1901]),
        );
        assert_eq!(table.years().iter().copied().collect::<Vec<_>>(), vec![1900, 1901]);
        assert_eq!(table.total_count(), 7);
    }

    #[test]
    fn default_range_covers_131_years() {
        let range = YearRange::default();
        assert_eq!(range.len(), 131);
        assert!(range.contains(1880));
        assert!(range.contains(2010));
        assert!(!range.contains(2011));
        assert!(YearRange::new(1901, 1900).is_empty());
    }

    #[test]
    fn retry_policy_bounds() {
        assert!(RetryPolicy::from_max_attempts(None).allows(u32::MAX));
        assert!(RetryPolicy::from_max_attempts(Some(0)).allows(1_000));
        let bounded = RetryPolicy::from_max_attempts(Some(2));
        assert!(bounded.allows(1));
        assert!(!bounded.allows(2));
    }
}
