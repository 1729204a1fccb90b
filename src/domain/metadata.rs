//! Enrichment records returned by the metadata and trailer providers.

use serde::{Deserialize, Serialize};

/// Placeholder shown for any field the provider does not know.
pub const UNKNOWN_TEXT: &str = "Unknown";

/// Sentinel the metadata provider uses for missing values.
const PROVIDER_NOT_AVAILABLE: &str = "N/A";

/// A single metadata field: either a value or the explicit "unknown" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "state", content = "value")]
pub enum FieldValue {
    Known(String),
    #[default]
    Unknown,
}

impl FieldValue {
    /// Normalizes a raw provider string.
    ///
    /// Missing, blank and `"N/A"` values all become [`FieldValue::Unknown`].
    ///
    /// ```
    /// use marquee::domain::FieldValue;
    ///
    /// assert_eq!(FieldValue::from_provider(Some("N/A")), FieldValue::Unknown);
    /// assert_eq!(FieldValue::from_provider(Some("  ")), FieldValue::Unknown);
    /// assert_eq!(
    ///     FieldValue::from_provider(Some("Christopher Nolan")),
    ///     FieldValue::Known("Christopher Nolan".to_string())
    /// );
    /// ```
    #[must_use]
    pub fn from_provider(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(value) if !value.is_empty() && value != PROVIDER_NOT_AVAILABLE => {
                Self::Known(value.to_string())
            }
            _ => Self::Unknown,
        }
    }

    /// Text to render, with [`UNKNOWN_TEXT`] standing in for unknown values.
    #[must_use]
    pub fn display(&self) -> &str {
        match self {
            Self::Known(value) => value,
            Self::Unknown => UNKNOWN_TEXT,
        }
    }

    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

/// Resolved metadata for one movie.
///
/// Produced only for a successful provider response; a "not found" answer or a
/// transport failure never yields a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MetadataRecord {
    pub title: FieldValue,
    pub plot: FieldValue,
    pub director: FieldValue,
    pub actors: FieldValue,
    pub genre: FieldValue,
    pub runtime: FieldValue,
    pub released: FieldValue,
    pub box_office: FieldValue,
    pub awards: FieldValue,
}

/// Reference to a playable trailer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailerRef {
    /// Provider video id (a YouTube key for the default trailer provider).
    pub video_id: String,
    /// Hosting site, e.g. `YouTube`.
    pub site: String,
}

impl TrailerRef {
    #[must_use]
    pub fn youtube(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            site: "YouTube".to_string(),
        }
    }

    /// Embeddable URL for the trailer, when the site is known.
    #[must_use]
    pub fn embed_url(&self) -> Option<String> {
        if self.site.eq_ignore_ascii_case("youtube") {
            Some(format!("https://www.youtube.com/embed/{}", self.video_id))
        } else {
            None
        }
    }
}
