use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Count of consecutive completed days ending at `reference`.
///
/// Walks backward one day at a time and stops at the first date missing
/// from the set. Gaps earlier in the history do not matter, and dates
/// after `reference` are never visited. An empty set yields 0.
pub fn current_streak(dates: &BTreeSet<NaiveDate>, reference: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut cursor = reference;
    while dates.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break, // ran off the calendar
        }
    }
    streak
}
