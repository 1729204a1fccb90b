//! Marquee: a movie gallery core with filtering, pagination and hover enrichment.
//!
//! Marquee keeps a fixed movie catalog and provides:
//! - Search, decade, country, genre and favorites-only filters over the catalog
//! - Seven sort modes with locale-aware title ordering
//! - Incremental "load more" pagination
//! - Favorites and light/dark theme persisted to a JSON preferences file
//! - A detail panel enriched from OMDb (metadata) and TMDB (trailers), with a
//!   debounced hover, stale-response suppression and a session cache
//! - Rating statistics and fuzzy title suggestions for empty results

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host binary (main.rs): stdin commands → events     │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime/)                                 │  ← tokio event loop
//! │  - Debounce timer, spawned fetches, render sink     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, focus tokens, panel slots        │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Gallery       │   │ Storage       │   │ Enrichment    │
//! │ (gallery/)    │   │ (storage/)    │   │ (enrichment/) │
//! │ - Filter/sort │   │ - Favorites   │   │ - OMDb        │
//! │ - Pagination  │   │ - Theme       │   │ - TMDB        │
//! │ - Stats       │   │ - JSON file   │   │ - Cache       │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Catalog, Domain & Infrastructure                   │
//! │  - Item registry (catalog/)                         │
//! │  - Movie, metadata, errors (domain/)                │
//! │  - Data paths (infrastructure/)                     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional export
//! │  - tracing subscriber, OpenTelemetry JSON-lines     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```toml
//! # marquee.toml
//! catalog_path = "~/movies.json"
//! page_size = 12
//! debounce_ms = 300
//! locale = "en-US"
//! trailer_language = "en-US"
//! trace_level = "debug"
//! trace_file = "/tmp/marquee-spans.jsonl"
//! ```
//!
//! API keys come from `OMDB_API_KEY` and `TMDB_API_KEY`; without them the panel
//! still works and shows `Unknown` fields and no trailer.
//!
//! # Example
//!
//! ```rust
//! use marquee::catalog::ItemRegistry;
//! use marquee::storage::Preferences;
//! use marquee::{handle_event, initialize, Config, Event};
//!
//! let registry = ItemRegistry::from_json_str(
//!     r#"[{"id": "tt0468569", "title": "The Dark Knight", "year": 2008, "rating": 9.0}]"#,
//! )?;
//! let mut state = initialize(&Config::default(), registry, Preferences::default());
//!
//! let (render, _actions) = handle_event(&mut state, &Event::SearchChanged("dark".into()))?;
//! assert!(render);
//! assert_eq!(state.view.len(), 1);
//! # Ok::<(), marquee::MarqueeError>(())
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod enrichment;
pub mod gallery;
pub mod infrastructure;
pub mod runtime;
pub mod storage;
pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, SessionSettings};
pub use domain::{MarqueeError, Result};
pub use ui::Theme;

use catalog::ItemRegistry;
use enrichment::{EnrichmentPipeline, OmdbClient, TmdbTrailerClient, DEFAULT_OMDB_URL, DEFAULT_TMDB_URL};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use storage::Preferences;

/// Runtime configuration, read from a TOML file and the environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Catalog JSON file. A leading `~` is expanded.
    pub catalog_path: Option<PathBuf>,

    /// Items revealed per "load more". Default: 12
    pub page_size: usize,

    /// Hover quiet period before a metadata request. Default: 300
    pub debounce_ms: u64,

    /// Locale for title collation. Default: `"en-US"`
    pub locale: String,

    /// Language hint for trailer lookups. Default: `"en-US"`
    pub trailer_language: String,

    /// OMDb key. Prefer `OMDB_API_KEY`.
    pub omdb_api_key: Option<String>,
    pub omdb_base_url: String,

    /// TMDB key. Prefer `TMDB_API_KEY`.
    pub tmdb_api_key: Option<String>,
    pub tmdb_base_url: String,

    /// Per-request timeout for both providers. Default: 5000
    pub request_timeout_ms: u64,

    /// Where `preferences.json` lives. Default: see [`infrastructure::get_data_dir`].
    pub data_dir: Option<PathBuf>,

    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. `RUST_LOG` wins when set.
    pub trace_level: Option<String>,

    /// Enables OpenTelemetry span export to this file.
    pub trace_file: Option<PathBuf>,

    /// Fixed seed for the random pick.
    pub random_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            page_size: gallery::DEFAULT_PAGE_SIZE,
            debounce_ms: 300,
            locale: "en-US".to_string(),
            trailer_language: "en-US".to_string(),
            omdb_api_key: None,
            omdb_base_url: DEFAULT_OMDB_URL.to_string(),
            tmdb_api_key: None,
            tmdb_base_url: DEFAULT_TMDB_URL.to_string(),
            request_timeout_ms: 5000,
            data_dir: None,
            trace_level: None,
            trace_file: None,
            random_seed: None,
        }
    }
}

impl Config {
    /// Reads a TOML config file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Io`] if the file cannot be read and
    /// [`MarqueeError::Config`] if it does not parse or fails validation.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// # Errors
    ///
    /// Returns [`MarqueeError::Config`] on malformed TOML, unknown keys or
    /// invalid values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| MarqueeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`MarqueeError::Config`] for a zero page size or request timeout.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(MarqueeError::Config("page_size must be positive".to_string()));
        }
        if self.request_timeout_ms == 0 {
            return Err(MarqueeError::Config(
                "request_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Applies `OMDB_API_KEY`, `TMDB_API_KEY` and `MARQUEE_DATA_DIR`.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`; empty values are ignored.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("OMDB_API_KEY") {
            self.omdb_api_key = Some(key);
        }
        if let Some(key) = get("TMDB_API_KEY") {
            self.tmdb_api_key = Some(key);
        }
        if let Some(dir) = get(infrastructure::DATA_DIR_ENV) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        self
    }

    #[must_use]
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            page_size: self.page_size,
            debounce: Duration::from_millis(self.debounce_ms),
            locale: self.locale.clone(),
            trailer_language: self.trailer_language.clone(),
            random_seed: self.random_seed,
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .as_ref()
            .map_or_else(infrastructure::get_data_dir, |dir| {
                infrastructure::expand_tilde(&dir.to_string_lossy())
            })
    }

    #[must_use]
    pub fn preferences_path(&self) -> PathBuf {
        infrastructure::preferences_path(&self.data_dir())
    }

    /// Catalog path with `~` expanded, if configured.
    #[must_use]
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog_path
            .as_ref()
            .map(|p| infrastructure::expand_tilde(&p.to_string_lossy()))
    }

    /// Builds the enrichment pipeline backed by the OMDb and TMDB clients.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Provider`] if an HTTP client cannot be built.
    pub fn build_pipeline(&self) -> Result<EnrichmentPipeline> {
        let timeout = Duration::from_millis(self.request_timeout_ms);
        let provider_error = |e: enrichment::ProviderError| MarqueeError::Provider(e.to_string());

        if self.omdb_api_key.is_none() {
            tracing::warn!("OMDB_API_KEY not set; panel metadata will show as unknown");
        }
        if self.tmdb_api_key.is_none() {
            tracing::warn!("TMDB_API_KEY not set; trailers are unavailable");
        }

        let omdb = OmdbClient::new(&self.omdb_base_url, self.omdb_api_key.clone(), timeout)
            .map_err(provider_error)?;
        let tmdb = TmdbTrailerClient::new(&self.tmdb_base_url, self.tmdb_api_key.clone(), timeout)
            .map_err(provider_error)?;

        Ok(EnrichmentPipeline::new(Arc::new(omdb), Arc::new(tmdb)))
    }
}

/// Creates the session state from a loaded catalog and stored preferences.
///
/// Criteria start at their defaults and the first page is revealed. Favorites
/// naming identities that are not in the catalog are kept but never match.
#[must_use]
pub fn initialize(config: &Config, registry: ItemRegistry, prefs: Preferences) -> AppState {
    tracing::debug!(
        movies = registry.len(),
        favorites = prefs.favorites.len(),
        theme = %prefs.theme,
        "initializing marquee"
    );
    AppState::new(Arc::new(registry), prefs, &config.session_settings())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn toml_overrides_defaults() {
        let config = Config::from_toml_str(
            r#"
            page_size = 6
            debounce_ms = 150
            locale = "sv-SE"
            random_seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.page_size, 6);
        assert_eq!(config.locale, "sv-SE");
        assert_eq!(config.request_timeout_ms, 5000);

        let settings = config.session_settings();
        assert_eq!(settings.debounce, Duration::from_millis(150));
        assert_eq!(settings.random_seed, Some(7));
    }

    #[test]
    fn rejects_invalid_config() {
        assert!(matches!(
            Config::from_toml_str("page_size = 0"),
            Err(MarqueeError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("pagesize = 3"),
            Err(MarqueeError::Config(_))
        ));
    }

    #[test]
    fn environment_overrides_keys_and_data_dir() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("OMDB_API_KEY", "omdb-key"),
            ("TMDB_API_KEY", "  "),
            ("MARQUEE_DATA_DIR", "/srv/marquee"),
        ]);
        let config = Config::default().with_overrides(|k| env.get(k).map(|v| (*v).to_string()));

        assert_eq!(config.omdb_api_key.as_deref(), Some("omdb-key"));
        assert_eq!(config.tmdb_api_key, None);
        assert_eq!(
            config.preferences_path(),
            PathBuf::from("/srv/marquee/preferences.json")
        );
    }
}
