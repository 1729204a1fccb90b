//! Storage layer for persisted user preferences.
//!
//! Two independent keys are persisted: the theme (`light`/`dark`) and the
//! favorites list. Both are read once at startup and written through on every
//! change.
//!
//! # Modules
//!
//! - `backend`: [`PreferenceStore`] trait and an in-memory implementation
//! - `json`: JSON file-based store
//! - `favorites`: In-memory favorites set consulted by the filter engine
//! - `models`: On-disk record types

pub mod backend;
pub mod favorites;
pub mod json;
pub mod models;

pub use backend::{MemoryPreferences, PreferenceStore};
pub use favorites::FavoritesSet;
pub use json::JsonPreferences;
pub use models::{Preferences, PreferencesRecord, ThemePreference};
