//! Domain layer - Mood entries, calendar arithmetic and statistics

pub mod calendar;
pub mod entry;
pub mod period;
pub mod stats;
pub mod theme;
pub mod time_ref;

pub use calendar::{CalendarModel, CalendarView, DayCell, Direction, GridCell, WeekStart};
pub use entry::{EntryIndex, MoodEntry, MoodLevel};
pub use period::{Period, PeriodWindow};
pub use stats::{PeriodStat, StatsAggregator, TrendPoint};
pub use theme::{SubscriptionId, ThemeId, ThemePreference};
pub use time_ref::TimeReference;
