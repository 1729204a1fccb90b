//! OMDb metadata client.
//!
//! Request: `GET {base}?apikey={key}&i={identity}&plot=full&r=json`.
//! A body with `"Response": "False"` means the identity is unknown to OMDb.

use super::provider::{MetadataProvider, ProviderError};
use crate::domain::{FieldValue, MetadataRecord};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::Instrument;

pub const DEFAULT_OMDB_URL: &str = "http://www.omdbapi.com/";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbResponse {
    response: String,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    plot: Option<String>,
    #[serde(default)]
    director: Option<String>,
    #[serde(default)]
    actors: Option<String>,
    #[serde(default)]
    genre: Option<String>,
    #[serde(default)]
    runtime: Option<String>,
    #[serde(default)]
    released: Option<String>,
    #[serde(default)]
    box_office: Option<String>,
    #[serde(default)]
    awards: Option<String>,
}

impl OmdbResponse {
    fn into_record(self, identity: &str) -> Result<MetadataRecord, ProviderError> {
        if !self.response.eq_ignore_ascii_case("true") {
            let reason = self.error.unwrap_or_else(|| "no data".to_string());
            return Err(ProviderError::NotFound(format!("{identity}: {reason}")));
        }

        Ok(MetadataRecord {
            title: FieldValue::from_provider(self.title.as_deref()),
            plot: FieldValue::from_provider(self.plot.as_deref()),
            director: FieldValue::from_provider(self.director.as_deref()),
            actors: FieldValue::from_provider(self.actors.as_deref()),
            genre: FieldValue::from_provider(self.genre.as_deref()),
            runtime: FieldValue::from_provider(self.runtime.as_deref()),
            released: FieldValue::from_provider(self.released.as_deref()),
            box_office: FieldValue::from_provider(self.box_office.as_deref()),
            awards: FieldValue::from_provider(self.awards.as_deref()),
        })
    }
}

/// HTTP client for the OMDb API.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OmdbClient {
    /// Builds a client with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Transport`] if the TLS backend cannot be initialized.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("marquee/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }
}

#[async_trait]
impl MetadataProvider for OmdbClient {
    fn name(&self) -> &'static str {
        "omdb"
    }

    async fn fetch_metadata(&self, identity: &str) -> Result<MetadataRecord, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey("omdb"))?;

        let span = tracing::debug_span!("omdb_lookup", identity);
        self.lookup(api_key, identity).instrument(span).await
    }
}

impl OmdbClient {
    async fn lookup(&self, api_key: &str, identity: &str) -> Result<MetadataRecord, ProviderError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("apikey", api_key),
                ("i", identity),
                ("plot", "full"),
                ("r", "json"),
            ])
            .send()
            .await?
            .error_for_status()?;
        tracing::debug!(status = %response.status(), "OMDb responded");

        let body: OmdbResponse = response.json().await?;
        body.into_record(identity)
    }
}
