//! Output formatting utilities

use crate::domain::{CalendarView, GridCell, MoodEntry, MoodLevel, PeriodStat, TrendPoint};
use chrono::{NaiveDate, Weekday};

/// Format one entry as a single line
pub fn format_entry(entry: &MoodEntry) -> String {
    let mut line = format!(
        "{}  {} ({})",
        entry.date.format("%Y-%m-%d"),
        entry.mood,
        entry.mood.label()
    );
    if let Some(note) = &entry.note {
        line.push_str("  ");
        line.push_str(note);
    }
    line
}

/// Format a list of entries for display
pub fn format_entry_list(entries: &[MoodEntry]) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&format_entry(entry));
        output.push('\n');
    }
    output
}

/// Render a month grid. Selected days are bracketed, days with an entry carry `*`.
pub fn format_calendar(view: &CalendarView, headers: &[Weekday; 7]) -> String {
    let mut output = String::new();

    if let Some(first) = NaiveDate::from_ymd_opt(view.year, view.month, 1) {
        output.push_str(&first.format("%B %Y").to_string());
        output.push('\n');
    }

    let header: String = headers
        .iter()
        .map(|wd| format!(" {:>2}  ", &wd.to_string()[..2]))
        .collect();
    output.push_str(header.trim_end());
    output.push('\n');

    for week in view.weeks() {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                GridCell::Blank => "     ".to_string(),
                GridCell::Day(day) => format!(
                    "{}{:>2}{}{}",
                    if day.is_selected { '[' } else { ' ' },
                    day.day(),
                    if day.has_entry { '*' } else { ' ' },
                    if day.is_selected { ']' } else { ' ' },
                ),
            })
            .collect();
        output.push_str(row.trim_end());
        output.push('\n');
    }

    output
}

fn format_mean(mean: Option<f64>) -> String {
    match mean {
        Some(value) => {
            let label = MoodLevel::new(value.round() as u8)
                .map(MoodLevel::label)
                .unwrap_or("?");
            format!("{:.2} ({})", value, label)
        }
        None => "no data".to_string(),
    }
}

/// Format a period summary
pub fn format_stats(stat: &PeriodStat) -> String {
    let window = &stat.window;
    let mut output = if window.start == window.end {
        format!("{} {}\n", window.period, window.start.format("%Y-%m-%d"))
    } else {
        format!(
            "{} {} to {}\n",
            window.period,
            window.start.format("%Y-%m-%d"),
            window.end.format("%Y-%m-%d")
        )
    };

    output.push_str(&format!("Entries: {}\n", stat.entries.len()));
    output.push_str(&format!("Average mood: {}\n", format_mean(stat.mean)));
    output.push_str(&format!(
        "Previous {}: {}\n",
        window.period,
        format_mean(stat.previous_mean)
    ));
    match stat.change_percent {
        Some(change) => output.push_str(&format!("Change: {:+.1}%\n", change)),
        None => output.push_str("Change: n/a\n"),
    }
    output
}

/// Format a trend sequence, one bucket per line
pub fn format_trend(points: &[TrendPoint]) -> String {
    let mut output = String::from("Trend:\n");
    for point in points {
        let value = point
            .mean
            .map(|m| format!("{:.2}", m))
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!("  {:<10} {:>5}\n", point.label, value));
    }
    output
}
