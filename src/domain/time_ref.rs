//! Date references typed on the command line

use crate::domain::calendar::offset_date;
use crate::error::{MoodlogError, Result};
use chrono::{Datelike, NaiveDate, Weekday};

/// A date reference resolved against a base date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeReference {
    Today,
    Yesterday,
    Tomorrow,
    /// Most recent occurrence of a weekday, today included
    Weekday(Weekday),
    /// Occurrence strictly before today
    LastWeekday(Weekday),
    /// Occurrence strictly after today
    NextWeekday(Weekday),
    Date(NaiveDate),
}

fn weekday_named(name: &str) -> Option<Weekday> {
    let weekday = match name {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}

impl TimeReference {
    /// Parse `today`, weekday names, `last <weekday>`, `next <weekday>` or `YYYY-MM-DD`
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();
        let invalid = || MoodlogError::InvalidTimeReference(input.to_string());

        match normalized.as_str() {
            "today" | "now" => return Ok(TimeReference::Today),
            "yesterday" => return Ok(TimeReference::Yesterday),
            "tomorrow" => return Ok(TimeReference::Tomorrow),
            _ => {}
        }

        if let Some(rest) = normalized.strip_prefix("last ") {
            return weekday_named(rest.trim())
                .map(TimeReference::LastWeekday)
                .ok_or_else(invalid);
        }
        if let Some(rest) = normalized.strip_prefix("next ") {
            return weekday_named(rest.trim())
                .map(TimeReference::NextWeekday)
                .ok_or_else(invalid);
        }
        if let Some(weekday) = weekday_named(&normalized) {
            return Ok(TimeReference::Weekday(weekday));
        }

        NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
            .map(TimeReference::Date)
            .map_err(|_| invalid())
    }

    /// Resolve against `base`; fails only at the edges of the date range
    pub fn resolve(&self, base: NaiveDate) -> Result<NaiveDate> {
        match self {
            TimeReference::Today => Ok(base),
            TimeReference::Yesterday => offset_date(base, -1),
            TimeReference::Tomorrow => offset_date(base, 1),
            TimeReference::Weekday(target) => offset_date(base, -days_back(base, *target)),
            TimeReference::LastWeekday(target) => {
                let back = match days_back(base, *target) {
                    0 => 7,
                    n => n,
                };
                offset_date(base, -back)
            }
            TimeReference::NextWeekday(target) => {
                let forward = match days_back(base, *target) {
                    0 => 7,
                    n => 7 - n,
                };
                offset_date(base, forward)
            }
            TimeReference::Date(date) => Ok(*date),
        }
    }
}

/// Days from the most recent `target` (today included) up to `base`
fn days_back(base: NaiveDate, target: Weekday) -> i64 {
    i64::from((base.weekday().num_days_from_monday() + 7 - target.num_days_from_monday()) % 7)
}

/// Parse and resolve in one step
pub fn resolve_date(input: &str, base: NaiveDate) -> Result<NaiveDate> {
    TimeReference::parse(input)?.resolve(base)
}
