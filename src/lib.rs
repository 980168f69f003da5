//! Habit tracking and completion analytics.
//!
//! Habits are registered once and completed at most once per calendar day.
//! The analytics layer turns the raw completion history into current-streak
//! counts, completion percentages, and gap-filled day/week/month views.
//! Persistence sits behind [`store::HabitStore`], with an in-memory backend
//! for tests and a SQLite backend for real use.

pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use analytics::StatsService;
pub use analytics::period::{Period, total_days};
pub use db::{HabitStore, MemoryStore, SqliteStore};
pub use error::{Error, Result};
pub use models::{Completion, DayStatistic, Frequency, Habit, HabitReport};
