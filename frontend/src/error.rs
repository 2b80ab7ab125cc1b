//! Error types for the calendar engine.

use thiserror::Error;

/// Errors surfaced by the calendar engine.
///
/// Collaborator failures (event fetch, attendance writes) never show up here:
/// they degrade the calendar to "show less" instead of propagating.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid month: {0}. Must be between 1 and 12")]
    InvalidMonth(u32),

    #[error("Year out of range: {0}")]
    InvalidYear(i32),

    #[error("Invalid date key '{0}'. Expected YYYY-MM-DD")]
    InvalidDateKey(String),

    #[error("Invalid month key '{0}'. Expected YYYY-MM")]
    InvalidMonthKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for CalendarError {
    fn from(err: serde_yaml::Error) -> Self {
        CalendarError::Config(err.to_string())
    }
}

/// Result type alias for calendar operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
