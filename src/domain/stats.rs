//! Period summaries and trend sequences

use crate::domain::calendar::{offset_date, WeekStart};
use crate::domain::entry::{mean_mood, EntryIndex, MoodEntry};
use crate::domain::period::{Period, PeriodWindow};
use crate::error::{MoodlogError, Result};
use chrono::NaiveDate;

/// Summary of one period window
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodStat {
    pub window: PeriodWindow,
    pub entries: Vec<MoodEntry>,
    /// Mean mood, `None` without entries
    pub mean: Option<f64>,
    /// Mean mood of the preceding window
    pub previous_mean: Option<f64>,
    /// Percentage change versus the preceding window
    pub change_percent: Option<f64>,
}

/// One bucket of a trend sequence
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub mean: Option<f64>,
}

/// Computes statistics by re-reading the index on every call
pub struct StatsAggregator<'a, I: EntryIndex + ?Sized> {
    index: &'a I,
    week_start: WeekStart,
}

impl<'a, I: EntryIndex + ?Sized> StatsAggregator<'a, I> {
    pub fn new(index: &'a I, week_start: WeekStart) -> Self {
        StatsAggregator { index, week_start }
    }

    pub fn summarize(&self, period: Period, reference: NaiveDate) -> Result<PeriodStat> {
        let window = period.window(reference, self.week_start)?;

        let entries = self.index.entries_between(window.start, window.end)?;
        let mean = mean_mood(&entries);
        // No earlier window exists at the start of the date range
        let previous_mean = match window.previous() {
            Ok(previous) => mean_mood(&self.index.entries_between(previous.start, previous.end)?),
            Err(_) => None,
        };

        Ok(PeriodStat {
            window,
            entries,
            mean,
            previous_mean,
            change_percent: percent_change(mean, previous_mean),
        })
    }

    /// Split the period window into `bucket_count` contiguous sub-windows
    pub fn trend_series(
        &self,
        period: Period,
        reference: NaiveDate,
        bucket_count: usize,
    ) -> Result<Vec<TrendPoint>> {
        let window = period.window(reference, self.week_start)?;
        let span = window.len_days() as usize;
        if bucket_count == 0 || bucket_count > span {
            return Err(MoodlogError::InvalidRange(format!(
                "bucket count {} must be between 1 and {} for a {} window",
                bucket_count, span, period
            )));
        }

        let entries = self.index.entries_between(window.start, window.end)?;

        let mut points = Vec::with_capacity(bucket_count);
        for i in 0..bucket_count {
            let from = i * span / bucket_count;
            let to = (i + 1) * span / bucket_count;
            let start = offset_date(window.start, from as i64)?;
            let end = offset_date(window.start, to as i64 - 1)?;

            let in_bucket: Vec<MoodEntry> = entries
                .iter()
                .filter(|e| start <= e.date && e.date <= end)
                .cloned()
                .collect();

            points.push(TrendPoint {
                label: bucket_label(period, start, end),
                start,
                end,
                mean: mean_mood(&in_bucket),
            });
        }

        Ok(points)
    }
}

/// `(current - previous) / previous * 100`, undefined without both values or for a zero base
pub fn percent_change(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    match (current, previous) {
        (Some(c), Some(p)) if p != 0.0 => Some((c - p) / p * 100.0),
        _ => None,
    }
}

fn bucket_label(period: Period, start: NaiveDate, end: NaiveDate) -> String {
    if start != end {
        return format!("{}-{}", start.format("%-d"), end.format("%-d"));
    }
    match period {
        Period::Day => start.format("%Y-%m-%d").to_string(),
        Period::Week => start.format("%a").to_string(),
        Period::Month => start.format("%-d").to_string(),
    }
}
