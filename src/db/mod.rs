pub mod memory;
pub mod migrations;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::error::Result;
use crate::models::{Completion, Habit};

/// Persistence boundary for habits and their completions.
///
/// One interface, two backends: [`MemoryStore`] for tests and
/// [`SqliteStore`] for real data. Both enforce the same rules — a habit
/// id must exist before anything can be read or written under it, and a
/// habit can be completed at most once per calendar day.
pub trait HabitStore {
    /// Persist a new habit and return it with its assigned id.
    fn insert_habit(&mut self, habit: Habit) -> Result<Habit>;

    /// Fetch a habit by id, or `Error::HabitNotFound`.
    fn find_habit(&self, id: i64) -> Result<Habit>;

    /// Update name, description and frequency of an existing habit.
    /// Identity, owner and creation date are immutable.
    fn update_habit(&mut self, habit: &Habit) -> Result<()>;

    /// Delete a habit and cascade-delete all of its completions.
    fn delete_habit(&mut self, id: i64) -> Result<()>;

    /// All habits belonging to one owner, ordered by id.
    fn habits_for_owner(&self, owner_id: i64) -> Result<Vec<Habit>>;

    /// The habit's completion dates as an ordered set. This is the
    /// snapshot the analytics layer computes over.
    fn completion_dates(&self, habit_id: i64) -> Result<BTreeSet<NaiveDate>>;

    /// Full completion history, ascending by date.
    fn completions(&self, habit_id: i64) -> Result<Vec<Completion>>;

    /// Record a completion for `(habit_id, date)`. A second completion on
    /// the same day is rejected with `Error::DuplicateCompletion`.
    fn record_completion(&mut self, habit_id: i64, date: NaiveDate) -> Result<Completion>;

    /// Correct the date of an existing completion; returns whether a
    /// completion existed at `from`. The only permitted mutation of a
    /// completion; moving onto an already-completed day is a duplicate.
    fn move_completion(&mut self, habit_id: i64, from: NaiveDate, to: NaiveDate) -> Result<bool>;
}
