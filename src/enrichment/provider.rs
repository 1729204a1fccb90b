//! Provider traits for the two external enrichment services.

use crate::domain::{MetadataRecord, TrailerRef};
use async_trait::async_trait;
use thiserror::Error;

/// Failure reaching or interpreting an enrichment provider.
///
/// None of these are fatal: the pipeline turns every variant into an absent
/// value and the panel renders placeholders.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered but has no data for the identity.
    #[error("not found: {0}")]
    NotFound(String),

    /// Network failure, timeout or a non-success HTTP status.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response body could not be parsed.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The provider needs an API key and none is configured.
    #[error("no API key configured for {0}")]
    MissingApiKey(&'static str),
}

impl ProviderError {
    /// True for outcomes that are expected in normal operation and need no warning.
    #[must_use]
    pub const fn is_benign(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::MissingApiKey(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Looks up descriptive metadata (plot, director, ...) by identity.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    /// Fetches the metadata record for one identity.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotFound`] when the provider reports no data, and
    /// the other variants for transport or parse failures.
    async fn fetch_metadata(&self, identity: &str) -> Result<MetadataRecord, ProviderError>;
}

/// Looks up a trailer video by identity and language hint.
#[async_trait]
pub trait TrailerProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetches a trailer reference.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotFound`] when no video exists.
    async fn fetch_trailer(&self, identity: &str, language: &str)
        -> Result<TrailerRef, ProviderError>;
}
