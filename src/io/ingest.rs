//! Year-file ingest.
//!
//! Turns a directory of `yobYYYY.txt` files into one [`UnifiedTable`].
//!
//! Design goals:
//! - **Strict schema**: exactly `Name,Sex,Count`, no header row
//! - **Year from the file name**: the last 4 characters of the file stem
//! - **Deterministic behavior**: files are read in file-name order
//! - **No filtering**: every parsed row ends up in the table

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::StringRecord;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::domain::{IngestMode, Record, Sex, UnifiedTable};
use crate::error::IngestError;

/// Extension of the files that hold year records.
pub const YEAR_FILE_EXTENSION: &str = "txt";

/// One `Name,Sex,Count` line, read by position (year-files have no header).
#[derive(Debug, Deserialize)]
struct YearFileRow {
    name: String,
    sex: Sex,
    count: u64,
}

/// One year-file that made it into the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearFile {
    pub path: PathBuf,
    pub year: i32,
    pub rows: usize,
}

/// Ingest output: the table plus what was read and what was skipped.
#[derive(Debug, Clone)]
pub struct IngestedTable {
    pub table: UnifiedTable,
    pub files: Vec<YearFile>,
    /// Files dropped in [`IngestMode::Lenient`]; always empty in strict mode.
    pub skipped: Vec<IngestError>,
}

impl IngestedTable {
    pub fn rows_read(&self) -> usize {
        self.files.iter().map(|f| f.rows).sum()
    }
}

/// Load every year-file under `dir` into one table.
pub fn load_table(dir: &Path, mode: IngestMode) -> Result<IngestedTable, IngestError> {
    let paths = discover_year_files(dir)?;
    debug!(dir = %dir.display(), candidates = paths.len(), "discovered year-files");

    let mut records = Vec::new();
    let mut years = BTreeSet::new();
    let mut files = Vec::with_capacity(paths.len());
    let mut skipped = Vec::new();

    for path in paths {
        match read_year_file(&path) {
            Ok((year, rows)) => {
                debug!(path = %path.display(), year, rows = rows.len(), "read year-file");
                files.push(YearFile {
                    path,
                    year,
                    rows: rows.len(),
                });
                years.insert(year);
                records.extend(rows);
            }
            Err(err) => match mode {
                IngestMode::Strict => return Err(err),
                IngestMode::Lenient => {
                    warn!(path = %err.path().display(), error = %err, "skipping year-file");
                    skipped.push(err);
                }
            },
        }
    }

    let table = UnifiedTable::with_years(records, years);
    info!(
        files = files.len(),
        skipped = skipped.len(),
        rows = table.len(),
        "ingest complete"
    );

    Ok(IngestedTable {
        table,
        files,
        skipped,
    })
}

/// List the `*.txt` files directly under `dir`, sorted by file name.
pub fn discover_year_files(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let entries = fs::read_dir(dir).map_err(|e| IngestError::Io {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| IngestError::Io {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_year_file = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(YEAR_FILE_EXTENSION));
        if is_year_file {
            out.push(path);
        }
    }

    out.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(out)
}

/// Extract the 4-digit year that ends the file stem (`yob1900.txt` -> 1900).
pub fn year_from_filename(path: &Path) -> Result<i32, IngestError> {
    let bad_name = || IngestError::FilenameFormat {
        path: path.to_path_buf(),
    };

    let stem = path.file_stem().and_then(|s| s.to_str()).ok_or_else(bad_name)?;
    let chars: Vec<char> = stem.chars().collect();
    if chars.len() < 4 {
        return Err(bad_name());
    }
    let tail = &chars[chars.len() - 4..];
    if !tail.iter().all(char::is_ascii_digit) {
        return Err(bad_name());
    }

    tail.iter().collect::<String>().parse::<i32>().map_err(|_| bad_name())
}

/// Parse one year-file into records tagged with its year.
pub fn read_year_file(path: &Path) -> Result<(i32, Vec<Record>), IngestError> {
    let year = year_from_filename(path)?;

    let file = File::open(path).map_err(|e| IngestError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            if e.is_io_error() {
                IngestError::Io {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            } else {
                IngestError::FileFormat {
                    path: path.to_path_buf(),
                    line: e.position().map(|p| p.line() as usize).unwrap_or(idx + 1),
                    reason: format!("CSV parse error: {e}"),
                }
            }
        })?;

        // Whitespace-only lines trim down to a single empty field.
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }

        let line = record.position().map(|p| p.line() as usize).unwrap_or(idx + 1);
        let row = parse_row(&record, year).map_err(|reason| IngestError::FileFormat {
            path: path.to_path_buf(),
            line,
            reason,
        })?;
        rows.push(row);
    }

    Ok((year, rows))
}

fn parse_row(record: &StringRecord, year: i32) -> Result<Record, String> {
    if record.len() != 3 {
        return Err(format!("expected 3 fields (Name,Sex,Count), found {}", record.len()));
    }

    let row: YearFileRow = record.deserialize(None).map_err(|e| match e.kind() {
        csv::ErrorKind::Deserialize { err, .. } if err.field() == Some(2) => format!(
            "invalid count '{}' (expected a non-negative integer)",
            &record[2]
        ),
        _ => format!("invalid row ({e}); expected Name,F|M,Count"),
    })?;

    if row.name.is_empty() {
        return Err("empty name".to_string());
    }

    Ok(Record::new(row.name, row.sex, row.count, year))
}
