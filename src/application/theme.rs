//! Theme preference backed by the journal config

use crate::domain::{ThemeId, ThemePreference};
use crate::error::Result;
use crate::infrastructure::JournalRepository;
use std::str::FromStr;

/// Keeps the in-process [`ThemePreference`] and `config.toml` in step
pub struct ThemeService<R: JournalRepository> {
    repository: R,
    preference: ThemePreference,
}

impl<R: JournalRepository> ThemeService<R> {
    /// Initialize the preference from the stored config
    pub fn load(repository: R) -> Result<Self> {
        let config = repository.load_config()?;
        Ok(ThemeService {
            repository,
            preference: ThemePreference::new(config.theme),
        })
    }

    pub fn active(&self) -> ThemeId {
        self.preference.active()
    }

    /// Persist the theme, then switch and notify. Any failure leaves both memory
    /// and disk untouched.
    pub fn set_theme(&mut self, id: &str) -> Result<ThemeId> {
        let theme = ThemeId::from_str(id)?;
        if theme == self.preference.active() {
            return Ok(theme);
        }

        let mut config = self.repository.load_config()?;
        config.theme = theme;
        self.repository.save_config(&config)?;

        self.preference.set_theme(theme.as_str())
    }

    /// Access the preference to subscribe observers
    pub fn preference_mut(&mut self) -> &mut ThemePreference {
        &mut self.preference
    }
}
