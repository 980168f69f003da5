use chrono::NaiveDate;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the tracker can surface. All variants are recoverable at
/// the caller's discretion; none is fatal to the process.
#[derive(Debug, Error)]
pub enum Error {
    /// The habit id is unknown to the store.
    #[error("habit {0} not found")]
    HabitNotFound(i64),

    /// Unrecognized period token, or a period whose end precedes its start.
    #[error("invalid period: {0}")]
    InvalidPeriod(String),

    /// The habit already has a completion on this date. A business
    /// rejection, not a system fault.
    #[error("habit {habit_id} already completed on {date}")]
    DuplicateCompletion { habit_id: i64, date: NaiveDate },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl Error {
    pub fn invalid_range(start: NaiveDate, end: NaiveDate) -> Self {
        Error::InvalidPeriod(format!("end {} is before start {}", end, start))
    }
}
