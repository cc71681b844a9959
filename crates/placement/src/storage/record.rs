use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use uuid::Uuid;

/// Date layout used by every data file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Password assigned to accounts whose password column is blank.
pub const DEFAULT_PASSWORD: &str = "password";

/// An entity that maps onto one row of a CSV data file.
pub trait CsvRecord: Clone {
    /// Key the owning store indexes the record by.
    type Key: Ord + Clone + Display;

    /// Human readable entity name used in logs and errors.
    const KIND: &'static str;
    /// Header row written at the top of the file. Its length is the column count.
    const HEADER: &'static [&'static str];

    fn key(&self) -> Self::Key;

    /// Build a record from decoded fields. `fields` holds exactly `HEADER.len()` entries.
    fn from_fields(fields: &[String]) -> Result<Self, RowError>;

    fn to_fields(&self) -> Vec<String>;

    /// Column-count check followed by [`CsvRecord::from_fields`].
    fn parse_row(fields: &[String]) -> Result<Self, RowError> {
        let expected = Self::HEADER.len();
        if fields.len() != expected {
            return Err(RowError::ColumnCount {
                expected,
                found: fields.len(),
            });
        }
        Self::from_fields(fields)
    }
}

/// Reasons a single row is rejected while loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },
    #[error("{column} must not be blank")]
    Blank { column: &'static str },
    #[error("{column} is not a valid integer: {value:?}")]
    Integer { column: &'static str, value: String },
    #[error("{column} is not a YYYY-MM-DD date: {value:?}")]
    Date { column: &'static str, value: String },
    #[error("{column} is not a valid UUID: {value:?}")]
    Uuid { column: &'static str, value: String },
    #[error("{column} has unrecognised value {value:?}")]
    Label { column: &'static str, value: String },
}

pub(crate) fn required(column: &'static str, value: &str) -> Result<String, RowError> {
    if value.trim().is_empty() {
        Err(RowError::Blank { column })
    } else {
        Ok(value.to_string())
    }
}

pub(crate) fn parse_integer<N: FromStr>(column: &'static str, value: &str) -> Result<N, RowError> {
    value.trim().parse().map_err(|_| RowError::Integer {
        column,
        value: value.to_string(),
    })
}

pub(crate) fn parse_date(column: &'static str, value: &str) -> Result<NaiveDate, RowError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| RowError::Date {
        column,
        value: value.to_string(),
    })
}

pub(crate) fn parse_uuid(column: &'static str, value: &str) -> Result<Uuid, RowError> {
    Uuid::parse_str(value.trim()).map_err(|_| RowError::Uuid {
        column,
        value: value.to_string(),
    })
}

pub(crate) fn parse_label<T>(
    column: &'static str,
    value: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<T, RowError> {
    parse(value).ok_or_else(|| RowError::Label {
        column,
        value: value.to_string(),
    })
}

/// Only a case-insensitive `true` counts; anything else reads as `false`.
pub(crate) fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

pub(crate) fn password_or_default(value: &str) -> String {
    if value.trim().is_empty() {
        DEFAULT_PASSWORD.to_string()
    } else {
        value.to_string()
    }
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
