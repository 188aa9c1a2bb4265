//! moodlog - Personal mood journal
//!
//! Records one mood rating (and optional note) per calendar day, lays the
//! entries out on a month grid and aggregates them into daily, weekly and
//! monthly summaries and trends.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

pub use error::MoodlogError;
