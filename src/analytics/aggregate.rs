use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::analytics::period::total_days;
use crate::error::Result;
use crate::models::DayStatistic;

/// Gap-filled view of `[start, end]`: exactly one [`DayStatistic`] per
/// calendar day, ascending, marked completed iff the day is in `dates`.
/// Days without a completion still appear, which is what lets the
/// day/week/month views render misses as well as hits.
pub fn bucket(
    dates: &BTreeSet<NaiveDate>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DayStatistic>> {
    let days = total_days(start, end)?;
    let mut stats = Vec::with_capacity(days as usize);
    let mut day = start;
    while day <= end {
        stats.push(DayStatistic {
            date: day,
            completed: dates.contains(&day),
        });
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    Ok(stats)
}

/// Completions inside `[start, end]` divided by the period's day count.
/// The period is validated before dividing, so the result is a real
/// number in 0.0..=1.0, never NaN or infinity.
pub fn percentage(dates: &BTreeSet<NaiveDate>, start: NaiveDate, end: NaiveDate) -> Result<f64> {
    let days = total_days(start, end)?;
    let completed = dates.range(start..=end).count();
    Ok(completed as f64 / days as f64)
}
