//! Preference record models for the persistence layer.
//!
//! These types are the on-disk representation. They are kept separate from the
//! in-memory [`FavoritesSet`](crate::storage::FavoritesSet) so the file format can
//! stay a plain list regardless of how lookups are done at runtime.

use crate::storage::favorites::FavoritesSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Persisted light/dark choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    /// The other theme.
    ///
    /// ```
    /// use marquee::storage::ThemePreference;
    ///
    /// assert_eq!(ThemePreference::Light.toggled(), ThemePreference::Dark);
    /// assert_eq!(ThemePreference::Dark.toggled(), ThemePreference::Light);
    /// ```
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// On-disk preferences file.
///
/// Theme and favorites are independent keys; writing one never touches the
/// other's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesRecord {
    /// Format version, reserved for future migrations.
    pub version: u32,

    #[serde(default)]
    pub theme: ThemePreference,

    /// Favorite identities. Order carries no meaning; written sorted.
    #[serde(default)]
    pub favorites: Vec<String>,

    /// Unix timestamp of the last write.
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl Default for PreferencesRecord {
    fn default() -> Self {
        Self {
            version: 1,
            theme: ThemePreference::default(),
            favorites: Vec::new(),
            updated_at: None,
        }
    }
}

impl PreferencesRecord {
    /// Stamps the record with the current time.
    pub fn touch(&mut self) {
        self.updated_at = Some(chrono::Utc::now().timestamp());
    }
}

/// Preferences as read once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    pub theme: ThemePreference,
    pub favorites: FavoritesSet,
}

impl From<PreferencesRecord> for Preferences {
    fn from(record: PreferencesRecord) -> Self {
        Self {
            theme: record.theme,
            favorites: FavoritesSet::from_ids(record.favorites),
        }
    }
}
