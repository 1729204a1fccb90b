//! View model types representing one rendered frame.
//!
//! View models are computed from `AppState::compute_viewmodel()` and handed to a
//! render sink. They contain no logic, only display-ready data, and serialize to
//! the JSON frames the host binary emits.
//!
//! # Example
//!
//! ```rust
//! use marquee::ui::{FieldView, MediaView};
//!
//! assert_eq!(FieldView::Unknown.text(), "Unknown");
//! assert_eq!(FieldView::Loading.text(), "Loading…");
//! assert!(matches!(MediaView::Empty, MediaView::Empty));
//! ```

use crate::domain::{FieldValue, UNKNOWN_TEXT};
use crate::gallery::{FilterCriteria, RatingStats, Suggestion};
use crate::ui::theme::Theme;
use serde::Serialize;

/// Complete frame for the gallery and its panel.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryViewModel {
    /// Every registry item, with a visibility flag.
    ///
    /// Matching items come first in view order; those past the reveal limit and
    /// all non-matching items are hidden but kept.
    pub cards: Vec<CardView>,

    /// Number of items matching the criteria.
    pub matched: usize,
    pub total: usize,
    pub reveal_limit: usize,
    /// Whether "load more" should be offered.
    pub has_more: bool,

    pub criteria: FilterCriteria,
    pub options: FilterOptions,

    /// Info panel for the focused item, if any.
    pub panel: Option<PanelView>,

    /// Rating summary of the matching items.
    pub stats: Option<RatingStats>,

    /// Close-match titles, only when a non-empty query matched nothing.
    pub suggestions: Vec<Suggestion>,

    pub theme: Theme,
}

/// One gallery card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub identity: String,
    pub title: String,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub poster: Option<String>,
    pub visible: bool,
    pub favorite: bool,
    pub focused: bool,
}

/// Dropdown contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub decades: Vec<i32>,
    pub countries: Vec<String>,
    pub genres: Vec<String>,
    pub sort_modes: Vec<&'static str>,
}

/// Field-update bundle for the info panel.
///
/// Immediate fields come straight from the registry; metadata fields follow the
/// enrichment lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub identity: String,
    pub title: String,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    /// Poster used as the panel background.
    pub background: Option<String>,
    pub favorite: bool,

    pub plot: FieldView,
    pub director: FieldView,
    pub actors: FieldView,
    pub genre: FieldView,
    pub runtime: FieldView,
    pub released: FieldView,
    pub box_office: FieldView,
    pub awards: FieldView,

    pub media: MediaView,
}

/// A single metadata field as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "text")]
pub enum FieldView {
    Loading,
    Value(String),
    Unknown,
    /// Nothing focused yet.
    Empty,
}

impl FieldView {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Loading => "Loading…",
            Self::Value(text) => text,
            Self::Unknown => UNKNOWN_TEXT,
            Self::Empty => "",
        }
    }
}

impl From<&FieldValue> for FieldView {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Known(text) => Self::Value(text.clone()),
            FieldValue::Unknown => Self::Unknown,
        }
    }
}

/// Media slot as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum MediaView {
    Empty,
    Loading,
    Trailer {
        video_id: String,
        site: String,
        embed_url: Option<String>,
    },
    /// No trailer; the host shows the poster placeholder.
    Unavailable,
}

/// User-visible notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// A random pick was requested over an empty view.
    NoMatches,
}

impl Notice {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoMatches => "No movies match the current filters.",
        }
    }
}
