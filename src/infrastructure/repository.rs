//! Journal directory and entry persistence

use crate::domain::{MoodEntry, MoodLevel};
use crate::error::{MoodlogError, Result};
use crate::infrastructure::config::{Config, MOODLOG_DIR};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const ENTRIES_FILE: &str = "entries.toml";
const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// On-disk shape of one entry, keyed by its ISO date
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedRecord {
    mood_level: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// A persisted record that was skipped on load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorruptRecord {
    pub key: String,
    pub reason: String,
}

/// Result of loading the persisted mapping
#[derive(Debug, Default)]
pub struct LoadedEntries {
    pub entries: BTreeMap<NaiveDate, MoodEntry>,
    pub corrupt: Vec<CorruptRecord>,
}

/// Durable date -> entry mapping
pub trait EntryRepository {
    /// Read the whole mapping, skipping records that do not fit the schema
    fn load_entries(&self) -> Result<LoadedEntries>;

    /// Replace the whole mapping
    fn save_entries(&self, entries: &BTreeMap<NaiveDate, MoodEntry>) -> Result<()>;
}

/// Journal directory operations
pub trait JournalRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .moodlog/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .moodlog/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .moodlog directory exists
    fn is_initialized(&self) -> bool;

    /// Create .moodlog directory structure
    fn initialize(&self) -> Result<()>;
}

fn decode_record(key: &str, value: toml::Value) -> std::result::Result<MoodEntry, String> {
    let date = NaiveDate::parse_from_str(key, DATE_KEY_FORMAT)
        .ok()
        .filter(|date| date.format(DATE_KEY_FORMAT).to_string() == key)
        .ok_or_else(|| format!("key '{}' is not a YYYY-MM-DD date", key))?;
    let record: PersistedRecord = value.try_into().map_err(|e| e.to_string())?;

    let mood = u8::try_from(record.mood_level)
        .ok()
        .and_then(|v| MoodLevel::new(v).ok())
        .ok_or_else(|| format!("moodLevel {} is outside 1-5", record.mood_level))?;

    if record.updated_at < record.created_at {
        return Err("updatedAt is earlier than createdAt".to_string());
    }

    Ok(MoodEntry {
        date,
        mood,
        note: record.note,
        created_at: record.created_at,
        updated_at: record.updated_at,
    })
}

/// Parse the persisted mapping. Individual bad records are reported, not fatal.
pub fn decode_entries(contents: &str) -> Result<LoadedEntries> {
    let table: toml::Table = toml::from_str(contents)
        .map_err(|e| MoodlogError::CorruptPersistedState(format!("{}: {}", ENTRIES_FILE, e)))?;

    let mut loaded = LoadedEntries::default();
    for (key, value) in table {
        let decoded = decode_record(&key, value).and_then(|entry| {
            if loaded.entries.contains_key(&entry.date) {
                Err(format!("duplicate entry for {}", entry.date))
            } else {
                Ok(entry)
            }
        });
        match decoded {
            Ok(entry) => {
                loaded.entries.insert(entry.date, entry);
            }
            Err(reason) => {
                tracing::warn!(key = %key, reason = %reason, "skipping corrupt entry");
                loaded.corrupt.push(CorruptRecord { key, reason });
            }
        }
    }
    Ok(loaded)
}

/// Serialize the mapping in the persisted schema
pub fn encode_entries(entries: &BTreeMap<NaiveDate, MoodEntry>) -> Result<String> {
    let records: BTreeMap<String, PersistedRecord> = entries
        .values()
        .map(|e| {
            (
                e.date.format(DATE_KEY_FORMAT).to_string(),
                PersistedRecord {
                    mood_level: i64::from(e.mood.value()),
                    note: e.note.clone(),
                    created_at: e.created_at,
                    updated_at: e.updated_at,
                },
            )
        })
        .collect();
    Ok(toml::to_string_pretty(&records)?)
}

/// File system implementation rooted at a journal directory
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover journal root by walking up from current directory
    /// First checks MOODLOG_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("MOODLOG_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_moodlog_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(MoodlogError::Config(format!(
                    "MOODLOG_ROOT is set to '{}' but no .moodlog directory found. \
                    Run 'moodlog init' in that directory or unset MOODLOG_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover journal root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        start
            .ancestors()
            .find(|dir| Self::has_moodlog_dir(dir))
            .map(|dir| FileSystemRepository::new(dir.to_path_buf()))
            .ok_or_else(|| MoodlogError::NotMoodlogDirectory(start.to_path_buf()))
    }

    fn has_moodlog_dir(path: &Path) -> bool {
        path.join(MOODLOG_DIR).is_dir()
    }

    pub fn entries_path(&self) -> PathBuf {
        self.root.join(MOODLOG_DIR).join(ENTRIES_FILE)
    }
}

impl JournalRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_moodlog_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let moodlog_dir = self.root.join(MOODLOG_DIR);

        if moodlog_dir.exists() {
            return Err(MoodlogError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&moodlog_dir)?;
        Ok(())
    }
}

impl EntryRepository for FileSystemRepository {
    fn load_entries(&self) -> Result<LoadedEntries> {
        let path = self.entries_path();
        if !path.exists() {
            return Ok(LoadedEntries::default());
        }
        decode_entries(&fs::read_to_string(&path)?)
    }

    /// Write to a temp file next to the target, then rename into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so the destination is removed first.
    fn save_entries(&self, entries: &BTreeMap<NaiveDate, MoodEntry>) -> Result<()> {
        let path = self.entries_path();
        if !self.is_initialized() {
            return Err(MoodlogError::NotMoodlogDirectory(self.root.clone()));
        }

        let contents = encode_entries(entries)?;
        let tmp_path = path.with_file_name(format!(
            "{}.moodlog-tmp-{}",
            ENTRIES_FILE,
            std::process::id()
        ));

        fs::write(&tmp_path, contents)?;
        if cfg!(windows) && path.exists() {
            fs::remove_file(&path)?;
        }
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

/// In-process repository holding the persisted text, for embedding and tests
#[derive(Debug, Default)]
pub struct MemoryRepository {
    contents: RefCell<String>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        MemoryRepository::default()
    }

    /// Start from already-persisted text
    pub fn from_toml(contents: impl Into<String>) -> Self {
        MemoryRepository {
            contents: RefCell::new(contents.into()),
        }
    }

    /// Current persisted text
    pub fn contents(&self) -> String {
        self.contents.borrow().clone()
    }
}

impl EntryRepository for MemoryRepository {
    fn load_entries(&self) -> Result<LoadedEntries> {
        decode_entries(&self.contents.borrow())
    }

    fn save_entries(&self, entries: &BTreeMap<NaiveDate, MoodEntry>) -> Result<()> {
        let encoded = encode_entries(entries)?;
        *self.contents.borrow_mut() = encoded;
        Ok(())
    }
}
