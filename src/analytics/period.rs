use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, Result};

/// A calendar window used for bucketed statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
        }
    }

    /// Inclusive `(start, end)` bounds of the window containing `reference`.
    ///
    /// A week always spans Monday through Sunday regardless of where the
    /// reference date falls in it; a month spans its actual length,
    /// leap February included.
    pub fn bounds(&self, reference: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Period::Day => (reference, reference),
            Period::Week => {
                let start = reference.week(Weekday::Mon).first_day();
                let end = reference.week(Weekday::Mon).last_day();
                (start, end)
            }
            Period::Month => {
                let start = reference.with_day(1).unwrap_or(reference);
                let end = start
                    .checked_add_months(chrono::Months::new(1))
                    .and_then(|d| d.checked_sub_days(Days::new(1)))
                    .unwrap_or(reference);
                (start, end)
            }
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            other => Err(Error::InvalidPeriod(format!("unknown period '{}'", other))),
        }
    }
}

/// Inclusive day count of `[start, end]`. An inverted range is invalid,
/// never a zero or negative count.
pub fn total_days(start: NaiveDate, end: NaiveDate) -> Result<i64> {
    if end < start {
        return Err(Error::invalid_range(start, end));
    }
    Ok((end - start).num_days() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn day_bounds_are_the_reference_itself() {
        let date = d(2024, 10, 16);
        assert_eq!(Period::Day.bounds(date), (date, date));
    }

    #[test]
    fn week_bounds_span_monday_to_sunday_from_midweek() {
        // 2024-10-16 is a Wednesday
        let (start, end) = Period::Week.bounds(d(2024, 10, 16));
        assert_eq!(start, d(2024, 10, 14));
        assert_eq!(end, d(2024, 10, 20));
    }

    #[test]
    fn week_bounds_from_monday_and_sunday_edges() {
        let (start, end) = Period::Week.bounds(d(2024, 10, 14));
        assert_eq!((start, end), (d(2024, 10, 14), d(2024, 10, 20)));

        let (start, end) = Period::Week.bounds(d(2024, 10, 20));
        assert_eq!((start, end), (d(2024, 10, 14), d(2024, 10, 20)));
    }

    #[test]
    fn month_bounds_use_actual_month_length() {
        let (start, end) = Period::Month.bounds(d(2024, 4, 12));
        assert_eq!((start, end), (d(2024, 4, 1), d(2024, 4, 30)));

        let (start, end) = Period::Month.bounds(d(2023, 12, 31));
        assert_eq!((start, end), (d(2023, 12, 1), d(2023, 12, 31)));
    }

    #[test]
    fn month_bounds_handle_leap_february() {
        let (start, end) = Period::Month.bounds(d(2024, 2, 10));
        assert_eq!((start, end), (d(2024, 2, 1), d(2024, 2, 29)));

        let (start, end) = Period::Month.bounds(d(2023, 2, 10));
        assert_eq!((start, end), (d(2023, 2, 1), d(2023, 2, 28)));
    }

    #[test]
    fn total_days_is_inclusive() {
        assert_eq!(total_days(d(2024, 10, 1), d(2024, 10, 1)).unwrap(), 1);
        assert_eq!(total_days(d(2024, 10, 1), d(2024, 10, 31)).unwrap(), 31);
    }

    #[test]
    fn total_days_rejects_inverted_range() {
        let err = total_days(d(2024, 10, 2), d(2024, 10, 1)).unwrap_err();
        assert!(matches!(err, Error::InvalidPeriod(_)));
    }

    #[test]
    fn period_parses_known_tokens_only() {
        assert_eq!("day".parse::<Period>().unwrap(), Period::Day);
        assert_eq!("Week".parse::<Period>().unwrap(), Period::Week);
        assert_eq!("MONTH".parse::<Period>().unwrap(), Period::Month);
        assert!(matches!(
            "fortnight".parse::<Period>(),
            Err(Error::InvalidPeriod(_))
        ));
    }
}
