use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A record that a habit was performed on a specific calendar date.
///
/// At most one completion exists per `(habit_id, date)` pair; the stores
/// reject a second completion on the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub id: Option<i64>,
    pub habit_id: i64,
    pub date: NaiveDate,
}

impl Completion {
    pub fn new(habit_id: i64, date: NaiveDate) -> Self {
        Self {
            id: None,
            habit_id,
            date,
        }
    }
}
