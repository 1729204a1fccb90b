//! Session cache and soft-failure wrapper around the enrichment providers.

use super::provider::{MetadataProvider, ProviderError, TrailerProvider};
use crate::domain::{MetadataRecord, TrailerRef};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::Instrument;

/// Fetches enrichment data for the panel.
///
/// Successful metadata is memoized per identity for the session. Failures and
/// "not found" answers are never cached, so the next request retries. Trailer
/// lookups always go to the provider.
///
/// Every provider error collapses to `None` here; callers only ever see an
/// absent value.
pub struct EnrichmentPipeline {
    metadata: Arc<dyn MetadataProvider>,
    trailers: Arc<dyn TrailerProvider>,
    cache: Mutex<HashMap<String, MetadataRecord>>,
}

impl EnrichmentPipeline {
    #[must_use]
    pub fn new(metadata: Arc<dyn MetadataProvider>, trailers: Arc<dyn TrailerProvider>) -> Self {
        Self {
            metadata,
            trailers,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Cached metadata, if this identity already resolved successfully.
    #[must_use]
    pub fn cached(&self, identity: &str) -> Option<MetadataRecord> {
        self.cache.lock().get(identity).cloned()
    }

    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.cache.lock().len()
    }

    /// Resolves metadata from the cache or the provider.
    pub async fn fetch_metadata(&self, identity: &str) -> Option<MetadataRecord> {
        if let Some(record) = self.cached(identity) {
            tracing::debug!(identity, "metadata cache hit");
            return Some(record);
        }

        let span = tracing::debug_span!("metadata_lookup", provider = self.metadata.name(), identity);
        let result = self.metadata.fetch_metadata(identity).instrument(span).await;

        match result {
            Ok(record) => {
                self.cache
                    .lock()
                    .entry(identity.to_string())
                    .or_insert_with(|| record.clone());
                Some(record)
            }
            Err(e) => {
                log_failure("metadata", identity, &e);
                None
            }
        }
    }

    /// Resolves a trailer. Not cached.
    pub async fn fetch_trailer(&self, identity: &str, language: &str) -> Option<TrailerRef> {
        let span = tracing::debug_span!(
            "trailer_lookup",
            provider = self.trailers.name(),
            identity,
            language
        );
        let result = self
            .trailers
            .fetch_trailer(identity, language)
            .instrument(span)
            .await;

        match result {
            Ok(trailer) => Some(trailer),
            Err(e) => {
                log_failure("trailer", identity, &e);
                None
            }
        }
    }
}

fn log_failure(kind: &str, identity: &str, error: &ProviderError) {
    if error.is_benign() {
        tracing::debug!(kind, identity, error = %error, "enrichment unavailable");
    } else {
        tracing::warn!(kind, identity, error = %error, "enrichment request failed");
    }
}

impl std::fmt::Debug for EnrichmentPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnrichmentPipeline")
            .field("metadata", &self.metadata.name())
            .field("trailers", &self.trailers.name())
            .field("cached", &self.cached_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldValue;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replays scripted outcomes and counts calls.
    struct Scripted {
        calls: AtomicUsize,
        outcomes: Mutex<VecDeque<bool>>,
    }

    impl Scripted {
        fn new(outcomes: &[bool]) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                outcomes: Mutex::new(outcomes.iter().copied().collect()),
            })
        }

        fn next_ok(&self) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcomes.lock().pop_front().unwrap_or(true)
        }
    }

    #[async_trait]
    impl MetadataProvider for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn fetch_metadata(&self, identity: &str) -> Result<MetadataRecord, ProviderError> {
            if self.next_ok() {
                Ok(MetadataRecord {
                    title: FieldValue::Known(identity.to_string()),
                    ..MetadataRecord::default()
                })
            } else {
                Err(ProviderError::Transport("connection reset".into()))
            }
        }
    }

    #[async_trait]
    impl TrailerProvider for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn fetch_trailer(
            &self,
            identity: &str,
            _language: &str,
        ) -> Result<TrailerRef, ProviderError> {
            if self.next_ok() {
                Ok(TrailerRef::youtube(format!("yt-{identity}")))
            } else {
                Err(ProviderError::NotFound(identity.to_string()))
            }
        }
    }

    #[tokio::test]
    async fn successful_metadata_is_fetched_once() {
        let provider = Scripted::new(&[true]);
        let pipeline = EnrichmentPipeline::new(provider.clone(), Scripted::new(&[]));

        assert!(pipeline.fetch_metadata("tt1").await.is_some());
        assert!(pipeline.fetch_metadata("tt1").await.is_some());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(pipeline.cached_count(), 1);
    }

    #[tokio::test]
    async fn failed_metadata_is_retried() {
        let provider = Scripted::new(&[false, true]);
        let pipeline = EnrichmentPipeline::new(provider.clone(), Scripted::new(&[]));

        assert!(pipeline.fetch_metadata("tt1").await.is_none());
        assert!(pipeline.cached("tt1").is_none());
        assert!(pipeline.fetch_metadata("tt1").await.is_some());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn trailers_are_never_cached() {
        let trailers = Scripted::new(&[true, false, true]);
        let pipeline = EnrichmentPipeline::new(Scripted::new(&[]), trailers.clone());

        assert_eq!(
            pipeline.fetch_trailer("tt1", "en-US").await,
            Some(TrailerRef::youtube("yt-tt1"))
        );
        assert_eq!(pipeline.fetch_trailer("tt1", "en-US").await, None);
        assert!(pipeline.fetch_trailer("tt1", "en-US").await.is_some());
        assert_eq!(trailers.calls.load(Ordering::SeqCst), 3);
    }
}
