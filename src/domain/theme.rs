//! Active theme preference with change subscriptions

use crate::error::{MoodlogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recognized theme identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    #[default]
    Dark,
    Midnight,
}

impl ThemeId {
    pub const ALL: [ThemeId; 2] = [ThemeId::Dark, ThemeId::Midnight];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeId::Dark => "dark",
            ThemeId::Midnight => "midnight",
        }
    }
}

impl FromStr for ThemeId {
    type Err = MoodlogError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        ThemeId::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| MoodlogError::UnknownTheme(s.to_string()))
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle returned by [`ThemePreference::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(ThemeId)>;

/// Process-scoped theme state. Mutation only goes through [`ThemePreference::set_theme`].
pub struct ThemePreference {
    active: ThemeId,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl ThemePreference {
    pub fn new(initial: ThemeId) -> Self {
        ThemePreference {
            active: initial,
            observers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn active(&self) -> ThemeId {
        self.active
    }

    /// Switch theme by id and notify subscribers if it changed
    pub fn set_theme(&mut self, id: &str) -> Result<ThemeId> {
        let theme = ThemeId::from_str(id)?;
        if theme != self.active {
            self.active = theme;
            tracing::info!(theme = %theme, "theme changed");
            for (_, observer) in self.observers.iter_mut() {
                observer(theme);
            }
        }
        Ok(theme)
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(ThemeId) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }
}

impl Default for ThemePreference {
    fn default() -> Self {
        ThemePreference::new(ThemeId::default())
    }
}

impl fmt::Debug for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemePreference")
            .field("active", &self.active)
            .field("observers", &self.observers.len())
            .finish()
    }
}
