use chrono::NaiveDate;
use thiserror::Error as ThisError;

/// Calendar dates are stored and exchanged as `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("Malformed date '{0}', expected YYYY-MM-DD")]
    Malformed(String),
}

/// Get the current local date.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a stored calendar date string.
pub fn parse_date(value: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| DateError::Malformed(value.to_string()))
}

/// Format a date the way it is stored.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
