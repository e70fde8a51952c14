//! Error types.
//!
//! - `IngestError`: fatal problems while reading year-files
//! - `YearError`: recoverable problems with a user-supplied year
//! - `AppError`: what `app::run` returns; carries the process exit code

use std::fmt;
use std::path::{Path, PathBuf};

/// Exit code for bad input data, bad flags, or unusable user input.
pub const EXIT_INPUT: u8 = 2;
/// Exit code for a dataset that ingested cleanly but holds nothing to chart.
pub const EXIT_EMPTY: u8 = 3;
/// Exit code for terminal/runtime failures.
pub const EXIT_RUNTIME: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failure while turning a directory of year-files into a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// A line could not be read as `Name,Sex,Count`.
    FileFormat {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    /// The year could not be taken from the file name.
    FilenameFormat { path: PathBuf },
    /// The directory or a file could not be read.
    Io { path: PathBuf, message: String },
}

impl IngestError {
    /// File the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            IngestError::FileFormat { path, .. }
            | IngestError::FilenameFormat { path }
            | IngestError::Io { path, .. } => path.as_path(),
        }
    }
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::FileFormat { path, line, reason } => {
                write!(f, "Malformed record in '{}' line {line}: {reason}", path.display())
            }
            IngestError::FilenameFormat { path } => write!(
                f,
                "Cannot read a year from file name '{}' (expected 4 digits before the extension, e.g. yob1900.txt)",
                path.display()
            ),
            IngestError::Io { path, message } => {
                write!(f, "Failed to read '{}': {message}", path.display())
            }
        }
    }
}

impl std::error::Error for IngestError {}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        AppError::new(EXIT_INPUT, err.to_string())
    }
}

/// Rejected year input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearError {
    NotANumber(String),
    OutOfRange(i64),
}

impl fmt::Display for YearError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearError::NotANumber(input) => write!(
                f,
                "Error: '{input}' is not a valid year. Please enter a number."
            ),
            YearError::OutOfRange(year) => write!(
                f,
                "Error: year {year} is out of range ({}-{}). Please enter a valid year.",
                crate::domain::MIN_YEAR,
                crate::domain::MAX_YEAR
            ),
        }
    }
}

impl std::error::Error for YearError {}

impl From<YearError> for AppError {
    fn from(err: YearError) -> Self {
        AppError::new(EXIT_INPUT, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_errors_map_to_input_exit_code() {
        let err = IngestError::FilenameFormat {
            path: PathBuf::from("yob/names.txt"),
        };
        let app: AppError = err.into();
        assert_eq!(app.exit_code(), EXIT_INPUT);
        assert!(app.to_string().contains("yob/names.txt"));
    }

    #[test]
    fn out_of_range_message_names_the_bounds() {
        let msg = YearError::OutOfRange(1700).to_string();
        assert!(msg.contains("1700"));
        assert!(msg.contains("1880-2010"));
    }
}
