//! Preference store abstraction.
//!
//! The trait is the explicit save/load port for user preferences: read once when
//! the app is initialized, written through on every change. Business logic never
//! touches storage directly; it emits persist actions that the runtime executes.

use crate::domain::error::Result;
use crate::storage::models::{Preferences, ThemePreference};

/// Abstraction over preference persistence backends.
///
/// # Implementations
///
/// - [`JsonPreferences`](crate::storage::JsonPreferences): JSON file with atomic writes (default)
/// - [`MemoryPreferences`]: process-local, for tests and ephemeral sessions
///
/// # Examples
///
/// ```no_run
/// use marquee::storage::{JsonPreferences, PreferenceStore};
/// use std::path::PathBuf;
///
/// let mut store = JsonPreferences::new(PathBuf::from("/tmp/marquee/preferences.json"))?;
/// let prefs = store.load()?;
/// store.save_theme(prefs.theme.toggled())?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait PreferenceStore: Send {
    /// Reads both preference keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load(&self) -> Result<Preferences>;

    /// Replaces the stored favorites list.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save_favorites(&mut self, favorites: &[String]) -> Result<()>;

    /// Replaces the stored theme.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save_theme(&mut self, theme: ThemePreference) -> Result<()>;
}

/// Non-persistent store. Writes are kept in memory and counted.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    theme: ThemePreference,
    favorites: Vec<String>,
    writes: usize,
}

impl MemoryPreferences {
    #[must_use]
    pub fn new(prefs: &Preferences) -> Self {
        Self {
            theme: prefs.theme,
            favorites: prefs.favorites.to_sorted_vec(),
            writes: 0,
        }
    }

    /// Number of save calls received.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load(&self) -> Result<Preferences> {
        Ok(Preferences {
            theme: self.theme,
            favorites: crate::storage::FavoritesSet::from_ids(self.favorites.iter().cloned()),
        })
    }

    fn save_favorites(&mut self, favorites: &[String]) -> Result<()> {
        self.favorites = favorites.to_vec();
        self.writes += 1;
        Ok(())
    }

    fn save_theme(&mut self, theme: ThemePreference) -> Result<()> {
        self.theme = theme;
        self.writes += 1;
        Ok(())
    }
}
