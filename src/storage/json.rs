//! JSON file-based preference store.
//!
//! The whole record is rewritten on every change using an atomic
//! write-to-temp + rename, so a crash never leaves a half-written file.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "theme": "dark",
//!   "favorites": ["tt0111161", "tt0468569"],
//!   "updated_at": 1760000000
//! }
//! ```

use crate::domain::error::{MarqueeError, Result};
use crate::storage::backend::PreferenceStore;
use crate::storage::models::{Preferences, PreferencesRecord, ThemePreference};
use std::path::{Path, PathBuf};

/// JSON file preference store.
///
/// Keeps the record in memory and persists it on every save call. If a write
/// fails the record stays dirty and one more attempt is made on drop.
pub struct JsonPreferences {
    file_path: PathBuf,
    record: PreferencesRecord,
    dirty: bool,
}

impl JsonPreferences {
    /// Opens the store, creating parent directories as needed.
    ///
    /// A missing file yields default preferences; nothing is written until the
    /// first change.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - The file exists but contains invalid JSON
    /// - File permissions prevent reading
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON preferences");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let record = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no preferences file yet, using defaults");
            PreferencesRecord::default()
        };

        tracing::debug!(
            theme = %record.theme,
            favorite_count = record.favorites.len(),
            "preferences initialized"
        );

        Ok(Self {
            file_path,
            record,
            dirty: false,
        })
    }

    /// Opens the store like [`JsonPreferences::new`], but replaces an
    /// unparseable file with defaults instead of failing.
    ///
    /// The reset record starts dirty, so the corrupt file is overwritten by
    /// the first save (or on drop).
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be accessed.
    pub fn open_or_reset(file_path: PathBuf) -> Result<Self> {
        match Self::new(file_path.clone()) {
            Err(MarqueeError::Storage(reason)) => {
                tracing::warn!(
                    path = ?file_path,
                    error = %reason,
                    "preferences file is corrupt, starting from defaults"
                );
                Ok(Self {
                    file_path,
                    record: PreferencesRecord::default(),
                    dirty: true,
                })
            }
            other => other,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<PreferencesRecord> {
        let contents = std::fs::read_to_string(path)?;
        let record: PreferencesRecord = serde_json::from_str(&contents)
            .map_err(|e| MarqueeError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(version = record.version, "loaded preferences");
        Ok(record)
    }

    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        self.record.touch();
        let json = serde_json::to_string_pretty(&self.record)
            .map_err(|e| MarqueeError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "preferences saved");
        Ok(())
    }
}

impl PreferenceStore for JsonPreferences {
    fn load(&self) -> Result<Preferences> {
        let _span = tracing::debug_span!("json_load_preferences").entered();
        Ok(Preferences::from(self.record.clone()))
    }

    fn save_favorites(&mut self, favorites: &[String]) -> Result<()> {
        let _span = tracing::debug_span!("json_save_favorites", count = favorites.len()).entered();

        if self.record.favorites != favorites {
            self.record.favorites = favorites.to_vec();
            self.dirty = true;
        }
        self.save_to_file()
    }

    fn save_theme(&mut self, theme: ThemePreference) -> Result<()> {
        let _span = tracing::debug_span!("json_save_theme", theme = %theme).entered();

        if self.record.theme != theme {
            self.record.theme = theme;
            self.dirty = true;
        }
        self.save_to_file()
    }
}

impl Drop for JsonPreferences {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty preferences on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save preferences on drop");
            }
        }
    }
}
