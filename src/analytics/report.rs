use chrono::NaiveDate;
use log::debug;

use crate::analytics::{aggregate, streak};
use crate::analytics::period::Period;
use crate::error::Result;
use crate::models::{DayStatistic, HabitReport};
use crate::db::HabitStore;

/// Read-only analytics over a [`HabitStore`].
///
/// Every method fetches an immutable snapshot of the habit's completion
/// dates and computes from that; nothing here writes back to the store.
pub struct StatsService<'a, S: HabitStore> {
    store: &'a S,
}

impl<'a, S: HabitStore> StatsService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Current consecutive-day streak ending at `reference`.
    pub fn streak(&self, habit_id: i64, reference: NaiveDate) -> Result<u32> {
        let dates = self.store.completion_dates(habit_id)?;
        Ok(streak::current_streak(&dates, reference))
    }

    /// Gap-filled day/week/month view around `reference`.
    pub fn period_statistics(
        &self,
        habit_id: i64,
        period: Period,
        reference: NaiveDate,
    ) -> Result<Vec<DayStatistic>> {
        let (start, end) = period.bounds(reference);
        debug!(
            "period statistics for habit {}: {} window {}..={}",
            habit_id, period, start, end
        );
        let dates = self.store.completion_dates(habit_id)?;
        aggregate::bucket(&dates, start, end)
    }

    /// Compose streak, completion count, and success rate into one report.
    ///
    /// The streak walks backward from `streak_reference`, which is a
    /// deliberate extra parameter: "today" and the period start give
    /// different answers, and the caller has to pick one.
    pub fn report(
        &self,
        habit_id: i64,
        period_start: NaiveDate,
        period_end: NaiveDate,
        streak_reference: NaiveDate,
    ) -> Result<HabitReport> {
        let habit = self.store.find_habit(habit_id)?;
        let dates = self.store.completion_dates(habit_id)?;

        let success_rate = aggregate::percentage(&dates, period_start, period_end)?;
        let total_completions = dates.range(period_start..=period_end).count() as u32;
        let current_streak = streak::current_streak(&dates, streak_reference);

        debug!(
            "report for habit {} ('{}'): streak {}, {} completions, rate {:.3}",
            habit_id, habit.name, current_streak, total_completions, success_rate
        );

        Ok(HabitReport {
            habit_name: habit.name,
            current_streak,
            total_completions,
            success_rate,
        })
    }
}
