//! Input checks applied to raw user input before anything is written to the store.
//!
//! Every check is a pure function returning a [`ValidationError`] on failure, so
//! the caller decides how to present the problem.

use chrono::{Datelike, NaiveDate};
use std::num::IntErrorKind;
use thiserror::Error;

/// External date format used at every interface boundary.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("value cannot be empty")]
    Empty,
    #[error("{0:?} is not a whole number")]
    NotAnInteger(String),
    #[error("{0:?} is too large to store")]
    OutOfRange(String),
    #[error("{0} is not greater than zero")]
    NotPositive(i64),
    #[error("{0:?} is not in DD-MM-YYYY format")]
    BadDateFormat(String),
    #[error("{0:?} is not a real calendar date")]
    NoSuchDate(String),
}

/// Parses `value` as a strictly positive integer.
///
/// Anything beyond the range of a 64-bit SQLite `INTEGER` is [`ValidationError::OutOfRange`].
pub fn validate_positive_integer(value: &str) -> Result<i64, ValidationError> {
    let parsed = value.trim().parse::<i64>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ValidationError::OutOfRange(value.to_string())
        }
        _ => ValidationError::NotAnInteger(value.to_string()),
    })?;
    validate_positive(parsed)
}

pub fn validate_positive(value: i64) -> Result<i64, ValidationError> {
    if value > 0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive(value))
    }
}

/// Parses a `DD-MM-YYYY` string into a calendar date.
///
/// Day and month must be zero-padded to two digits and the year must have four.
/// Surrounding whitespace is not tolerated.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, b)| match idx {
            2 | 5 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(ValidationError::BadDateFormat(value.to_string()));
    }

    let date = NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ValidationError::NoSuchDate(value.to_string()))?;
    // year 0000 parses in chrono but is not a usable calendar year
    if date.year() < 1 {
        return Err(ValidationError::NoSuchDate(value.to_string()));
    }
    Ok(date)
}

/// Returns `value` unchanged if it is a valid `DD-MM-YYYY` date.
pub fn validate_date(value: &str) -> Result<String, ValidationError> {
    parse_date(value).map(|_| value.to_string())
}

/// Rejects absent, empty and whitespace-only input; returns the trimmed text.
pub fn validate_non_empty<'a>(
    value: impl Into<Option<&'a str>>,
) -> Result<&'a str, ValidationError> {
    match value.into().map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed),
        _ => Err(ValidationError::Empty),
    }
}
