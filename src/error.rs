//! Error types for moodlog

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for moodlog
#[derive(Debug, Error)]
pub enum MoodlogError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Corrupt persisted state: {0}")]
    CorruptPersistedState(String),

    #[error("Not a moodlog directory: {0}")]
    NotMoodlogDirectory(PathBuf),

    #[error("Invalid time reference: {0}")]
    InvalidTimeReference(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl MoodlogError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            MoodlogError::NotMoodlogDirectory(_) => 2,
            MoodlogError::Validation(_)
            | MoodlogError::InvalidRange(_)
            | MoodlogError::OutOfRange(_)
            | MoodlogError::UnknownTheme(_)
            | MoodlogError::InvalidTimeReference(_) => 3,
            MoodlogError::CorruptPersistedState(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            MoodlogError::NotMoodlogDirectory(path) => {
                format!(
                    "Not a moodlog directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'moodlog init' in this directory to create a new journal\n\
                    • Navigate to an existing moodlog directory\n\
                    • Set MOODLOG_ROOT environment variable to your journal path",
                    path.display()
                )
            }
            MoodlogError::Validation(msg) => {
                format!(
                    "{}\n\n\
                    Mood levels:\n\
                    • 1 = Very Sad\n\
                    • 2 = Sad\n\
                    • 3 = Neutral\n\
                    • 4 = Happy\n\
                    • 5 = Very Happy\n\n\
                    Example: moodlog log 4 --note \"good walk\"",
                    msg
                )
            }
            MoodlogError::InvalidTimeReference(ref_str) => {
                format!(
                    "Invalid time reference: '{}'\n\n\
                    Valid time references:\n\
                    • today, yesterday, tomorrow\n\
                    • monday, tuesday, ..., sunday (most recent)\n\
                    • last monday, next friday, etc.\n\
                    • Specific dates: YYYY-MM-DD (e.g., 2025-01-17)\n\n\
                    Examples:\n\
                    moodlog show yesterday\n\
                    moodlog log 3 --date 2025-01-15",
                    ref_str
                )
            }
            MoodlogError::UnknownTheme(id) => {
                format!(
                    "Unknown theme: '{}'\n\n\
                    Valid themes: dark, midnight\n\
                    Example: moodlog theme midnight",
                    id
                )
            }
            MoodlogError::CorruptPersistedState(msg) => {
                format!(
                    "Corrupt persisted state: {}\n\n\
                    Suggestions:\n\
                    • Inspect .moodlog/entries.toml for hand edits\n\
                    • Keys must be dates (YYYY-MM-DD) and moodLevel must be 1-5",
                    msg
                )
            }
            MoodlogError::Config(msg) => {
                if msg.contains("week start") {
                    format!(
                        "{}\n\n\
                        Valid week starts: sunday, monday\n\
                        Example: moodlog config week_start monday",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using MoodlogError
pub type Result<T> = std::result::Result<T, MoodlogError>;
