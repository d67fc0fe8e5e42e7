use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur within the roster subsystem.
#[derive(Debug, Error)]
pub enum RosterError {
    /// Underlying SQLite / rusqlite error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No record exists for the given date.
    #[error("Shift not found: {date}")]
    NotFound { date: NaiveDate },

    /// A record for the given date already exists.
    #[error("Shift already exists: {date}")]
    Conflict { date: NaiveDate },

    /// The input is not a valid ISO-8601 calendar date.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The input is not one of the known shift-type labels.
    #[error("Invalid shift type: {0}")]
    InvalidShiftType(String),
}

pub type Result<T> = std::result::Result<T, RosterError>;
