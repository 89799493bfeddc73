//! Release date utilities
//!
//! Release dates travel as `DD.MM.YYYY` text and are stored verbatim. They are
//! only parsed to check the format and that the date is not in the future.

use chrono::{NaiveDate, Utc};
use thiserror::Error;

/// chrono format string for release dates
pub const RELEASE_DATE_FORMAT: &str = "%d.%m.%Y";

/// Release date validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReleaseDateError {
    #[error("Invalid date format. Expected format: DD.MM.YYYY")]
    InvalidFormat(String),

    #[error("Release date cannot be in the future")]
    FutureDate(String),
}

/// Get current UTC calendar date
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a `DD.MM.YYYY` string into a calendar date.
///
/// chrono accepts single-digit days and months for `%d`/`%m`, so the layout
/// is checked by hand first: two digits, dot, two digits, dot, four digits.
pub fn parse_release_date(value: &str) -> Result<NaiveDate, ReleaseDateError> {
    let bytes = value.as_bytes();
    let layout_ok = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'.',
            _ => b.is_ascii_digit(),
        });

    if !layout_ok {
        return Err(ReleaseDateError::InvalidFormat(value.to_string()));
    }

    NaiveDate::parse_from_str(value, RELEASE_DATE_FORMAT)
        .map_err(|_| ReleaseDateError::InvalidFormat(value.to_string()))
}

/// Validate a release date against `today`.
///
/// Today is accepted, anything strictly later is rejected.
pub fn check_release_date(value: &str, today: NaiveDate) -> Result<NaiveDate, ReleaseDateError> {
    let date = parse_release_date(value)?;
    if date > today {
        return Err(ReleaseDateError::FutureDate(value.to_string()));
    }
    Ok(date)
}

/// Validate a release date against the current UTC date
pub fn validate_release_date(value: &str) -> Result<NaiveDate, ReleaseDateError> {
    check_release_date(value, today())
}
