//! Month-grid calendar generation and navigation

use crate::domain::entry::EntryIndex;
use crate::error::{MoodlogError, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// First day of the week used for grid padding and week windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Index of the week start with Sunday = 0
    fn index(self) -> u32 {
        self.weekday().num_days_from_sunday()
    }

    /// Days from the week start back to `weekday`
    pub fn offset_of(self, weekday: Weekday) -> u32 {
        (weekday.num_days_from_sunday() + 7 - self.index()) % 7
    }

    /// First day of the week containing `date`
    pub fn week_containing(self, date: NaiveDate) -> Result<NaiveDate> {
        offset_date(date, -i64::from(self.offset_of(date.weekday())))
    }
}

impl FromStr for WeekStart {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            _ => Err(format!(
                "Invalid week start: '{}'. Valid values are: sunday, monday",
                s
            )),
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WeekStart::Sunday => "sunday",
            WeekStart::Monday => "monday",
        };
        f.write_str(name)
    }
}

/// Gregorian leap year rule
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in the given month; `None` if `month` is not 1-12
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => return None,
    };
    Some(days)
}

/// `date` moved by `days`, failing at the edges of the representable range
pub fn offset_date(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    date.checked_add_signed(Duration::days(days)).ok_or_else(|| {
        MoodlogError::OutOfRange(format!(
            "{} {:+} days is outside the supported date range",
            date, days
        ))
    })
}

/// Days in the month, rejecting months not fully representable as dates
fn check_month(year: i32, month: u32) -> Result<u32> {
    let days = days_in_month(year, month).ok_or_else(|| {
        MoodlogError::OutOfRange(format!("month {} of {} is not 1-12", month, year))
    })?;
    if NaiveDate::from_ymd_opt(year, month, 1).is_none()
        || NaiveDate::from_ymd_opt(year, month, days).is_none()
    {
        return Err(MoodlogError::OutOfRange(format!(
            "{}-{:02} is outside the supported date range",
            year, month
        )));
    }
    Ok(days)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// A day cell in the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub has_entry: bool,
    pub is_selected: bool,
}

impl DayCell {
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

/// One unit of the calendar view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    Blank,
    Day(DayCell),
}

/// Generated grid for one displayed month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<GridCell>,
}

impl CalendarView {
    pub fn blank_count(&self) -> usize {
        self.cells
            .iter()
            .take_while(|c| matches!(c, GridCell::Blank))
            .count()
    }

    pub fn day_cells(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(|c| match c {
            GridCell::Day(day) => Some(day),
            GridCell::Blank => None,
        })
    }

    /// Cells in rows of seven; the last row may be short
    pub fn weeks(&self) -> Vec<&[GridCell]> {
        self.cells.chunks(7).collect()
    }
}

/// Displayed month, selection and week-start convention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarModel {
    displayed_year: i32,
    displayed_month: u32,
    selected_date: Option<NaiveDate>,
    week_start: WeekStart,
}

impl CalendarModel {
    pub fn new(year: i32, month: u32, week_start: WeekStart) -> Result<Self> {
        check_month(year, month)?;
        Ok(CalendarModel {
            displayed_year: year,
            displayed_month: month,
            selected_date: None,
            week_start,
        })
    }

    /// Display the month containing `date`
    pub fn starting_at(date: NaiveDate, week_start: WeekStart) -> Self {
        CalendarModel {
            displayed_year: date.year(),
            displayed_month: date.month(),
            selected_date: None,
            week_start,
        }
    }

    pub fn displayed_year(&self) -> i32 {
        self.displayed_year
    }

    pub fn displayed_month(&self) -> u32 {
        self.displayed_month
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// The seven weekdays in display order
    pub fn weekday_headers(&self) -> [Weekday; 7] {
        let mut day = self.week_start.weekday();
        let mut headers = [day; 7];
        for slot in headers.iter_mut().skip(1) {
            day = day.succ();
            *slot = day;
        }
        headers
    }

    /// Build the grid for any month, probing `index` for every day
    pub fn grid_for<I: EntryIndex + ?Sized>(
        &self,
        year: i32,
        month: u32,
        index: &I,
    ) -> Result<CalendarView> {
        let days = check_month(year, month)?;
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            MoodlogError::OutOfRange(format!("{}-{:02} is not a representable month", year, month))
        })?;

        let blanks = self.week_start.offset_of(first.weekday()) as usize;
        let mut cells = Vec::with_capacity(blanks + days as usize);
        cells.extend(std::iter::repeat(GridCell::Blank).take(blanks));

        for date in first.iter_days().take(days as usize) {
            cells.push(GridCell::Day(DayCell {
                date,
                has_entry: index.has_entry(date),
                is_selected: self.selected_date == Some(date),
            }));
        }

        Ok(CalendarView { year, month, cells })
    }

    /// Grid for the displayed month
    pub fn current_grid<I: EntryIndex + ?Sized>(&self, index: &I) -> Result<CalendarView> {
        self.grid_for(self.displayed_year, self.displayed_month, index)
    }

    /// Move the displayed month, rolling the year at December/January.
    /// Leaving the representable range is an error and changes nothing.
    pub fn navigate(&mut self, direction: Direction) -> Result<()> {
        let (year, month) = match direction {
            Direction::Previous if self.displayed_month == 1 => {
                (self.displayed_year.checked_sub(1), 12)
            }
            Direction::Previous => (Some(self.displayed_year), self.displayed_month - 1),
            Direction::Next if self.displayed_month == 12 => (self.displayed_year.checked_add(1), 1),
            Direction::Next => (Some(self.displayed_year), self.displayed_month + 1),
        };
        let year = year.ok_or_else(|| {
            MoodlogError::OutOfRange(format!(
                "cannot move past {}-{:02}",
                self.displayed_year, self.displayed_month
            ))
        })?;
        check_month(year, month)?;

        self.displayed_year = year;
        self.displayed_month = month;
        tracing::debug!(
            year = self.displayed_year,
            month = self.displayed_month,
            "calendar navigated"
        );
        Ok(())
    }

    /// Select a day of the displayed month
    pub fn select_day(&mut self, day: u32) -> Result<NaiveDate> {
        let days = check_month(self.displayed_year, self.displayed_month)?;
        if !(1..=days).contains(&day) {
            return Err(MoodlogError::OutOfRange(format!(
                "day {} is outside 1-{} for {}-{:02}",
                day, days, self.displayed_year, self.displayed_month
            )));
        }

        let date = NaiveDate::from_ymd_opt(self.displayed_year, self.displayed_month, day)
            .ok_or_else(|| {
                MoodlogError::OutOfRange(format!(
                    "{}-{:02}-{:02} is not a valid date",
                    self.displayed_year, self.displayed_month, day
                ))
            })?;
        self.selected_date = Some(date);
        Ok(date)
    }

    pub fn clear_selection(&mut self) {
        self.selected_date = None;
    }
}
