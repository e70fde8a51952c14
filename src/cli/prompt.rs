//! Interactive year prompt.
//!
//! Validation is a pure function (`validate_year`); the prompt loop only
//! handles I/O and the retry policy, so it can be driven from tests with
//! in-memory readers/writers.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::domain::{MAX_YEAR, MIN_YEAR, RetryPolicy};
use crate::error::{AppError, EXIT_INPUT, YearError};

/// Parse `input` as a year within `MIN_YEAR..=MAX_YEAR`.
pub fn validate_year(input: &str) -> Result<i32, YearError> {
    let trimmed = input.trim();
    let year = trimmed
        .parse::<i64>()
        .map_err(|_| YearError::NotANumber(trimmed.to_string()))?;

    if year < i64::from(MIN_YEAR) || year > i64::from(MAX_YEAR) {
        return Err(YearError::OutOfRange(year));
    }

    Ok(year as i32)
}

/// Ask for a year on stdin until a valid one is entered.
pub fn prompt_for_year_stdin(policy: RetryPolicy) -> Result<i32, AppError> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    prompt_for_year(stdin.lock(), &mut stdout, policy)
}

/// Ask for a year until a valid one is entered.
///
/// Behavior:
/// - invalid answers print the validation error and prompt again
/// - end of input is an error
/// - with `RetryPolicy::Bounded(n)`, the `n`-th invalid answer is an error
pub fn prompt_for_year<R: BufRead, W: Write>(
    mut reader: R,
    writer: &mut W,
    policy: RetryPolicy,
) -> Result<i32, AppError> {
    let mut attempts = 0u32;

    loop {
        writeln!(writer, "Enter a year ({MIN_YEAR}-{MAX_YEAR}):")
            .and_then(|_| writer.flush())
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write prompt: {e}")))?;

        let mut input = String::new();
        let bytes = reader
            .read_line(&mut input)
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to read input: {e}")))?;

        if bytes == 0 {
            return Err(AppError::new(
                EXIT_INPUT,
                "No input received. Pass the year with `yob --year <YEAR>`.",
            ));
        }

        attempts = attempts.saturating_add(1);
        match validate_year(&input) {
            Ok(year) => return Ok(year),
            Err(err) => {
                debug!(attempt = attempts, error = %err, "rejected year input");
                writeln!(writer, "{err}")
                    .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write prompt: {e}")))?;
                if !policy.allows(attempts) {
                    return Err(AppError::new(
                        EXIT_INPUT,
                        format!("No valid year after {attempts} attempt(s)."),
                    ));
                }
            }
        }
    }
}
