use chrono::NaiveDate;
use thiserror::Error;

/// Validation errors for rental data and date-range input.
///
/// Row numbers are 1-based data rows (the CSV header is row 0).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataError {
    #[error("row {row}: unknown weather situation code {code} (expected 1-4)")]
    UnknownWeatherCode { row: usize, code: i64 },

    #[error("row {row}: hour {hour} out of range (expected 0-23)")]
    HourOutOfRange { row: usize, hour: i64 },

    #[error("row {row}: negative rental count {count}")]
    NegativeCount { row: usize, count: i64 },

    #[error("input file contains no records")]
    EmptyDataset,

    #[error("invalid date range: start {start} is after end {end}")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
}
