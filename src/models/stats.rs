use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day inside a bucketed view. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStatistic {
    pub date: NaiveDate,
    pub completed: bool,
}

/// Summary of a habit over a reporting period. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitReport {
    pub habit_name: String,
    pub current_streak: u32,
    pub total_completions: u32,
    /// Fraction of days in the period with a completion, 0.0..=1.0.
    pub success_rate: f64,
}

impl HabitReport {
    pub fn success_percent(&self) -> f64 {
        self.success_rate * 100.0
    }
}
