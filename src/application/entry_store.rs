//! The authoritative date -> entry store

use crate::domain::{EntryIndex, MoodEntry, MoodLevel};
use crate::error::{MoodlogError, Result};
use crate::infrastructure::{CorruptRecord, EntryRepository};
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;

/// Owns the entries of one journal and writes every change through `R`
#[derive(Debug)]
pub struct EntryStore<R: EntryRepository> {
    repository: R,
    entries: BTreeMap<NaiveDate, MoodEntry>,
    load_warnings: Vec<CorruptRecord>,
}

impl<R: EntryRepository> EntryStore<R> {
    /// Load the persisted mapping once. Corrupt records are skipped and kept in
    /// [`EntryStore::load_warnings`].
    pub fn open(repository: R) -> Result<Self> {
        let loaded = repository.load_entries()?;
        if !loaded.corrupt.is_empty() {
            tracing::warn!(
                skipped = loaded.corrupt.len(),
                loaded = loaded.entries.len(),
                "entry store opened with corrupt records"
            );
        }
        Ok(EntryStore {
            repository,
            entries: loaded.entries,
            load_warnings: loaded.corrupt,
        })
    }

    /// Create or overwrite the entry for `date`
    pub fn upsert(&mut self, date: NaiveDate, mood: u8, note: Option<String>) -> Result<MoodEntry> {
        let mood = MoodLevel::new(mood)?;
        let now = Utc::now();

        let previous = self.entries.get(&date).cloned();
        let entry = match &previous {
            Some(existing) => {
                let mut revised = existing.clone();
                revised.revise(mood, note, now);
                revised
            }
            None => MoodEntry::new(date, mood, note, now),
        };
        self.entries.insert(date, entry.clone());

        if let Err(e) = self.repository.save_entries(&self.entries) {
            match previous {
                Some(old) => self.entries.insert(date, old),
                None => self.entries.remove(&date),
            };
            return Err(e);
        }

        tracing::debug!(date = %date, mood = %mood, created = previous.is_none(), "entry saved");
        Ok(entry)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&MoodEntry> {
        self.entries.get(&date)
    }

    /// Remove the entry for `date`; `false` if there was none
    pub fn delete(&mut self, date: NaiveDate) -> Result<bool> {
        let Some(removed) = self.entries.remove(&date) else {
            return Ok(false);
        };

        if let Err(e) = self.repository.save_entries(&self.entries) {
            self.entries.insert(date, removed);
            return Err(e);
        }

        tracing::debug!(date = %date, "entry deleted");
        Ok(true)
    }

    /// Entries within `[start, end]` in ascending date order
    pub fn list_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<MoodEntry>> {
        if start > end {
            return Err(MoodlogError::InvalidRange(format!(
                "start {} is after end {}",
                start, end
            )));
        }
        Ok(self.entries.range(start..=end).map(|(_, e)| e.clone()).collect())
    }

    pub fn all(&self) -> impl Iterator<Item = &MoodEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records skipped while loading
    pub fn load_warnings(&self) -> &[CorruptRecord] {
        &self.load_warnings
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

impl<R: EntryRepository> EntryIndex for EntryStore<R> {
    fn has_entry(&self, date: NaiveDate) -> bool {
        self.entries.contains_key(&date)
    }

    fn entries_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<MoodEntry>> {
        self.list_in_range(start, end)
    }
}
