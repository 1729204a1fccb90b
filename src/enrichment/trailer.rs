//! TMDB trailer lookup.
//!
//! Request: `GET {base}/movie/{identity}/videos?api_key={key}&language={lang}`.
//! The first YouTube video typed `Trailer` wins; otherwise the first YouTube
//! video of any type.

use super::provider::{ProviderError, TrailerProvider};
use crate::domain::TrailerRef;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::Instrument;

pub const DEFAULT_TMDB_URL: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    results: Vec<Video>,
}

#[derive(Debug, Deserialize)]
struct Video {
    key: String,
    #[serde(default)]
    site: String,
    #[serde(default, rename = "type")]
    kind: String,
}

fn pick_trailer(videos: &[Video]) -> Option<&Video> {
    let youtube = |v: &&Video| v.site.eq_ignore_ascii_case("youtube") && !v.key.is_empty();
    videos
        .iter()
        .filter(youtube)
        .find(|v| v.kind.eq_ignore_ascii_case("trailer"))
        .or_else(|| videos.iter().find(youtube))
}

/// HTTP client for the TMDB videos endpoint.
#[derive(Debug, Clone)]
pub struct TmdbTrailerClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl TmdbTrailerClient {
    /// # Errors
    ///
    /// Returns [`ProviderError::Transport`] if the HTTP client cannot be built.
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
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }
}

#[async_trait]
impl TrailerProvider for TmdbTrailerClient {
    fn name(&self) -> &'static str {
        "tmdb"
    }

    async fn fetch_trailer(
        &self,
        identity: &str,
        language: &str,
    ) -> Result<TrailerRef, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey("tmdb"))?;

        let span = tracing::debug_span!("tmdb_trailer_lookup", identity, language);
        self.lookup(api_key, identity, language).instrument(span).await
    }
}

impl TmdbTrailerClient {
    /// Videos endpoint for `identity`, which is appended as one escaped path
    /// segment.
    fn videos_url(&self, identity: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ProviderError::Transport(format!("invalid TMDB base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| {
                ProviderError::Transport(format!("TMDB base URL has no path: {}", self.base_url))
            })?
            .pop_if_empty()
            .push("movie")
            .push(identity)
            .push("videos");
        Ok(url)
    }

    async fn lookup(
        &self,
        api_key: &str,
        identity: &str,
        language: &str,
    ) -> Result<TrailerRef, ProviderError> {
        let url = self.videos_url(identity)?;
        let response = self
            .client
            .get(url)
            .query(&[("api_key", api_key), ("language", language)])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(identity.to_string()));
        }
        let body: VideosResponse = response.error_for_status()?.json().await?;
        tracing::debug!(videos = body.results.len(), "TMDB responded");

        pick_trailer(&body.results)
            .map(|video| TrailerRef {
                video_id: video.key.clone(),
                site: video.site.clone(),
            })
            .ok_or_else(|| ProviderError::NotFound(format!("{identity}: no YouTube video")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> TmdbTrailerClient {
        TmdbTrailerClient::new(base_url, Some("key".into()), Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn identity_is_one_escaped_path_segment() {
        let url = client("https://api.themoviedb.org/3/")
            .videos_url("tt0468569")
            .unwrap();
        assert_eq!(url.as_str(), "https://api.themoviedb.org/3/movie/tt0468569/videos");

        let url = client("https://api.themoviedb.org/3")
            .videos_url("a/b?c#d")
            .unwrap();
        assert_eq!(url.path(), "/3/movie/a%2Fb%3Fc%23d/videos");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn unusable_base_url_is_a_transport_error() {
        assert!(matches!(
            client("not a url").videos_url("tt1"),
            Err(ProviderError::Transport(_))
        ));
        assert!(matches!(
            client("mailto:someone@example.com").videos_url("tt1"),
            Err(ProviderError::Transport(_))
        ));
    }

    fn video(key: &str, site: &str, kind: &str) -> Video {
        Video {
            key: key.into(),
            site: site.into(),
            kind: kind.into(),
        }
    }

    #[test]
    fn prefers_youtube_trailer() {
        let videos = vec![
            video("teaser1", "YouTube", "Teaser"),
            video("vimeo1", "Vimeo", "Trailer"),
            video("trailer1", "YouTube", "Trailer"),
        ];
        assert_eq!(pick_trailer(&videos).map(|v| v.key.as_str()), Some("trailer1"));
    }

    #[test]
    fn falls_back_to_any_youtube_video() {
        let videos = vec![
            video("vimeo1", "Vimeo", "Trailer"),
            video("clip1", "YouTube", "Clip"),
        ];
        assert_eq!(pick_trailer(&videos).map(|v| v.key.as_str()), Some("clip1"));
        assert!(pick_trailer(&[video("vimeo1", "Vimeo", "Trailer")]).is_none());
    }
}
