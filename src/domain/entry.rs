//! Mood entries and the mood scale

use crate::error::{MoodlogError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A mood rating on the fixed 5-point scale, 1 (Very Sad) to 5 (Very Happy)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MoodLevel(u8);

impl MoodLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validate a raw rating
    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(MoodLevel(value))
        } else {
            Err(MoodlogError::Validation(format!(
                "mood level {} is outside {}-{}",
                value,
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Presentation label for this level
    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Very Sad",
            2 => "Sad",
            3 => "Neutral",
            4 => "Happy",
            _ => "Very Happy",
        }
    }

    /// All levels from most negative to most positive
    pub fn all() -> impl Iterator<Item = MoodLevel> {
        (Self::MIN..=Self::MAX).map(MoodLevel)
    }
}

impl TryFrom<u8> for MoodLevel {
    type Error = MoodlogError;

    fn try_from(value: u8) -> Result<Self> {
        MoodLevel::new(value)
    }
}

impl From<MoodLevel> for u8 {
    fn from(level: MoodLevel) -> u8 {
        level.0
    }
}

impl FromStr for MoodLevel {
    type Err = MoodlogError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let value: i64 = trimmed.parse().map_err(|_| {
            MoodlogError::Validation(format!("mood level '{}' is not a number", trimmed))
        })?;
        match u8::try_from(value) {
            Ok(value) => MoodLevel::new(value),
            Err(_) => Err(MoodlogError::Validation(format!(
                "mood level {} is outside {}-{}",
                value,
                Self::MIN,
                Self::MAX
            ))),
        }
    }
}

impl fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One mood record for one calendar date
#[derive(Debug, Clone, PartialEq)]
pub struct MoodEntry {
    pub date: NaiveDate,
    pub mood: MoodLevel,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MoodEntry {
    /// Create a fresh entry; both timestamps are `now`
    pub fn new(date: NaiveDate, mood: MoodLevel, note: Option<String>, now: DateTime<Utc>) -> Self {
        MoodEntry {
            date,
            mood,
            note,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace mood and note in place, keeping `created_at`.
    ///
    /// `updated_at` never drops below `created_at`, even if the clock went backwards.
    pub fn revise(&mut self, mood: MoodLevel, note: Option<String>, now: DateTime<Utc>) {
        self.mood = mood;
        self.note = note;
        self.updated_at = now.max(self.created_at);
    }
}

/// Read-only view over the entries of a journal
pub trait EntryIndex {
    /// Whether an entry exists for exactly this date
    fn has_entry(&self, date: NaiveDate) -> bool;

    /// Entries within `[start, end]`, ascending by date
    fn entries_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<MoodEntry>>;
}

/// Arithmetic mean of the mood levels, `None` for an empty slice
pub fn mean_mood(entries: &[MoodEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let total: u32 = entries.iter().map(|e| u32::from(e.mood.value())).sum();
    Some(f64::from(total) / entries.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn entry(day: u32, mood: u8) -> MoodEntry {
        MoodEntry::new(
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            MoodLevel::new(mood).unwrap(),
            None,
            Utc::now(),
        )
    }

    #[test]
    fn test_mood_level_bounds() {
        assert!(MoodLevel::new(0).is_err());
        assert!(MoodLevel::new(6).is_err());
        for value in 1..=5 {
            assert_eq!(MoodLevel::new(value).unwrap().value(), value);
        }
    }

    #[test]
    fn test_mood_level_out_of_range_is_validation_error() {
        match MoodLevel::new(9).unwrap_err() {
            MoodlogError::Validation(msg) => assert!(msg.contains('9')),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_mood_level_from_str() {
        assert_eq!("4".parse::<MoodLevel>().unwrap().value(), 4);
        assert_eq!(" 2 ".parse::<MoodLevel>().unwrap().value(), 2);
        assert!("happy".parse::<MoodLevel>().is_err());
        assert!("-1".parse::<MoodLevel>().is_err());
        assert!("300".parse::<MoodLevel>().is_err());
        match "300".parse::<MoodLevel>().unwrap_err() {
            MoodlogError::Validation(msg) => assert!(msg.contains("outside 1-5")),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_labels_are_ordered_negative_to_positive() {
        let labels: Vec<&str> = MoodLevel::all().map(MoodLevel::label).collect();
        assert_eq!(
            labels,
            vec!["Very Sad", "Sad", "Neutral", "Happy", "Very Happy"]
        );
    }

    #[test]
    fn test_revise_keeps_created_at() {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let mut e = MoodEntry::new(
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            MoodLevel::new(2).unwrap(),
            Some("meh".to_string()),
            created,
        );

        let later = created + Duration::hours(3);
        e.revise(MoodLevel::new(4).unwrap(), None, later);

        assert_eq!(e.created_at, created);
        assert_eq!(e.updated_at, later);
        assert_eq!(e.mood.value(), 4);
        assert_eq!(e.note, None);
    }

    #[test]
    fn test_revise_clamps_backwards_clock() {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let mut e = MoodEntry::new(
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            MoodLevel::new(2).unwrap(),
            None,
            created,
        );

        e.revise(MoodLevel::new(3).unwrap(), None, created - Duration::minutes(5));
        assert_eq!(e.updated_at, created);
    }

    #[test]
    fn test_mean_mood() {
        assert_eq!(mean_mood(&[]), None);
        assert_eq!(mean_mood(&[entry(1, 5), entry(2, 3)]), Some(4.0));
        assert_eq!(
            mean_mood(&[entry(1, 1), entry(2, 2), entry(3, 2)]),
            Some(5.0 / 3.0)
        );
    }
}
