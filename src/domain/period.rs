//! Aggregation periods and their date windows

use crate::domain::calendar::{days_in_month, offset_date, WeekStart};
use crate::error::Result;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Aggregation granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
}

impl Period {
    /// Window of this granularity that contains `reference`
    pub fn window(self, reference: NaiveDate, week_start: WeekStart) -> Result<PeriodWindow> {
        let window = match self {
            Period::Day => PeriodWindow {
                period: self,
                start: reference,
                end: reference,
            },
            Period::Week => {
                let start = week_start.week_containing(reference)?;
                PeriodWindow {
                    period: self,
                    start,
                    end: offset_date(start, 6)?,
                }
            }
            Period::Month => {
                let start = reference.with_day(1).unwrap_or(reference);
                let days = days_in_month(reference.year(), reference.month()).unwrap_or(1);
                PeriodWindow {
                    period: self,
                    start,
                    end: offset_date(start, i64::from(days) - 1)?,
                }
            }
        };
        Ok(window)
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" | "daily" => Ok(Period::Day),
            "week" | "weekly" => Ok(Period::Week),
            "month" | "monthly" => Ok(Period::Month),
            _ => Err(format!(
                "Invalid period: '{}'. Valid periods are: day, week, month",
                s
            )),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
        };
        f.write_str(name)
    }
}

/// Inclusive date window for one period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    pub period: Period,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PeriodWindow {
    pub fn len_days(&self) -> u32 {
        ((self.end - self.start).num_days() + 1) as u32
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The immediately preceding window of the same granularity.
    ///
    /// For months this is the previous calendar month, whatever its length.
    pub fn previous(&self) -> Result<PeriodWindow> {
        let before = offset_date(self.start, -1)?;
        let window = match self.period {
            Period::Day => PeriodWindow {
                period: Period::Day,
                start: before,
                end: before,
            },
            Period::Week => PeriodWindow {
                period: Period::Week,
                start: offset_date(self.start, -7)?,
                end: before,
            },
            Period::Month => PeriodWindow {
                period: Period::Month,
                start: before.with_day(1).unwrap_or(before),
                end: before,
            },
        };
        Ok(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_window() {
        let w = Period::Day.window(ymd(2025, 3, 1), WeekStart::Sunday).unwrap();
        assert_eq!((w.start, w.end), (ymd(2025, 3, 1), ymd(2025, 3, 1)));
        let prev = w.previous().unwrap();
        assert_eq!((prev.start, prev.end), (ymd(2025, 2, 28), ymd(2025, 2, 28)));
    }

    #[test]
    fn test_week_window_crosses_month() {
        // Saturday, Mar 1, 2025
        let w = Period::Week.window(ymd(2025, 3, 1), WeekStart::Monday).unwrap();
        assert_eq!((w.start, w.end), (ymd(2025, 2, 24), ymd(2025, 3, 2)));
        assert_eq!(w.len_days(), 7);
        let prev = w.previous().unwrap();
        assert_eq!((prev.start, prev.end), (ymd(2025, 2, 17), ymd(2025, 2, 23)));
    }

    #[test]
    fn test_month_window_leap_february() {
        let w = Period::Month.window(ymd(2024, 2, 14), WeekStart::Sunday).unwrap();
        assert_eq!((w.start, w.end), (ymd(2024, 2, 1), ymd(2024, 2, 29)));
        assert_eq!(w.len_days(), 29);
    }

    #[test]
    fn test_previous_month_wraps_year() {
        let w = Period::Month.window(ymd(2025, 1, 20), WeekStart::Sunday).unwrap();
        let prev = w.previous().unwrap();
        assert_eq!((prev.start, prev.end), (ymd(2024, 12, 1), ymd(2024, 12, 31)));
        assert_eq!(prev.period, Period::Month);
    }

    #[test]
    fn test_windows_at_range_edges() {
        let first = NaiveDate::MIN;
        let day = Period::Day.window(first, WeekStart::Sunday).unwrap();
        assert!(matches!(
            day.previous(),
            Err(crate::error::MoodlogError::OutOfRange(_))
        ));

        let month = Period::Month.window(NaiveDate::MAX, WeekStart::Sunday).unwrap();
        assert_eq!(month.end, NaiveDate::MAX);
    }

    #[test]
    fn test_period_from_str() {
        assert_eq!("WEEK".parse::<Period>().unwrap(), Period::Week);
        assert_eq!("monthly".parse::<Period>().unwrap(), Period::Month);
        assert!("year".parse::<Period>().is_err());
    }
}
