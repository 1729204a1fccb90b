//! Application state management and view model computation.
//!
//! [`AppState`] is the single top-level owner of every piece of mutable session
//! state: filter criteria, favorites, pagination, focus and panel. It is only
//! mutated by the event handler, one event at a time.
//!
//! # State Components
//!
//! - **Registry**: Immutable catalog shared by reference
//! - **View**: Ordered catalog positions matching the criteria, recomputed by
//!   `apply_filters()`
//! - **Pagination**: Reveal limit over the view
//! - **Focus / Panel**: Hover target, pending debounce and slot contents
//! - **Theme**: Light or dark
//!
//! # Example
//!
//! ```rust
//! use marquee::app::{AppState, SessionSettings};
//! use marquee::catalog::ItemRegistry;
//! use marquee::domain::Movie;
//! use marquee::storage::Preferences;
//! use std::sync::Arc;
//!
//! let registry = ItemRegistry::from_movies(vec![
//!     Movie::new("tt0468569", "The Dark Knight", Some(2008), Some(9.0)),
//! ])?;
//! let state = AppState::new(Arc::new(registry), Preferences::default(), &SessionSettings::default());
//! let frame = state.compute_viewmodel();
//! assert_eq!(frame.matched, 1);
//! # Ok::<(), marquee::MarqueeError>(())
//! ```

use super::focus::{FocusState, MediaSlot, MetadataSlot, PanelState};
use crate::catalog::ItemRegistry;
use crate::domain::{FieldValue, MetadataRecord, Movie};
use crate::gallery::{
    compute_view, rating_stats, suggest_titles, FilterCriteria, Pagination, SortMode,
    TitleCollator, DEFAULT_PAGE_SIZE,
};
use crate::storage::{FavoritesSet, Preferences, ThemePreference};
use crate::ui::{
    CardView, FieldView, FilterOptions, GalleryViewModel, MediaView, PanelView, Theme,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;

/// Session knobs derived from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub page_size: usize,
    /// Quiet period before a hover triggers a metadata request.
    pub debounce: Duration,
    /// BCP 47 locale for title collation.
    pub locale: String,
    /// Language hint passed to the trailer provider.
    pub trailer_language: String,
    /// Seed for the random pick; `None` seeds from the OS.
    pub random_seed: Option<u64>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: Duration::from_millis(300),
            locale: "en-US".to_string(),
            trailer_language: "en-US".to_string(),
            random_seed: None,
        }
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Immutable catalog. Shared so that cloning state for a snapshot is cheap.
    pub registry: Arc<ItemRegistry>,

    /// Live filter inputs.
    pub criteria: FilterCriteria,

    /// Favorite identities, consulted by the favorites-only filter.
    pub favorites: FavoritesSet,

    pub pagination: Pagination,

    /// Catalog positions matching `criteria`, in sort order.
    ///
    /// Recomputed by `apply_filters()` after any criteria or favorites change.
    pub view: Vec<usize>,

    pub focus: FocusState,
    pub panel: PanelState,
    pub theme: ThemePreference,

    pub debounce: Duration,
    pub trailer_language: String,

    collator: Arc<TitleCollator>,
    rng: StdRng,
}

impl AppState {
    /// Creates state with default criteria and computes the initial view.
    #[must_use]
    pub fn new(registry: Arc<ItemRegistry>, prefs: Preferences, settings: &SessionSettings) -> Self {
        let rng = settings
            .random_seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        let mut state = Self {
            registry,
            criteria: FilterCriteria::default(),
            favorites: prefs.favorites,
            pagination: Pagination::new(settings.page_size),
            view: Vec::new(),
            focus: FocusState::default(),
            panel: PanelState::default(),
            theme: prefs.theme,
            debounce: settings.debounce,
            trailer_language: settings.trailer_language.clone(),
            collator: Arc::new(TitleCollator::new(&settings.locale)),
            rng,
        };
        state.apply_filters();
        state
    }

    /// Recomputes the view from the current criteria and favorites.
    ///
    /// Pagination is left as is; see [`criteria_changed`](Self::criteria_changed).
    pub fn apply_filters(&mut self) {
        self.view = compute_view(&self.registry, &self.criteria, &self.favorites, &self.collator);
    }

    /// Resets pagination and recomputes the view. Call after any criteria change.
    pub fn criteria_changed(&mut self) {
        self.pagination.reset_page();
        self.apply_filters();
    }

    #[must_use]
    pub fn movie(&self, identity: &str) -> Option<&Movie> {
        self.registry.by_identity(identity)
    }

    /// Identity of the first item in the current view.
    #[must_use]
    pub fn first_in_view(&self) -> Option<String> {
        self.view
            .first()
            .and_then(|&p| self.registry.get(p))
            .map(|m| m.identity.clone())
    }

    /// Uniformly picks one identity from the current view.
    pub fn random_in_view(&mut self) -> Option<String> {
        if self.view.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..self.view.len());
        self.registry
            .get(self.view[index])
            .map(|m| m.identity.clone())
    }

    /// Projects state into a renderable frame.
    #[must_use]
    pub fn compute_viewmodel(&self) -> GalleryViewModel {
        let reveal = self.pagination.reveal(&self.view);
        let focused = self.focus.current();

        let card = |position: usize, visible: bool| {
            self.registry.get(position).map(|movie| CardView {
                identity: movie.identity.clone(),
                title: movie.title.clone(),
                year: movie.year,
                rating: movie.rating,
                poster: movie.poster.clone(),
                visible,
                favorite: self.favorites.contains(&movie.identity),
                focused: focused == Some(movie.identity.as_str()),
            })
        };

        let mut matching = vec![false; self.registry.len()];
        for &position in &self.view {
            matching[position] = true;
        }

        let mut cards = Vec::with_capacity(self.registry.len());
        cards.extend(reveal.visible.iter().filter_map(|&p| card(p, true)));
        cards.extend(reveal.hidden.iter().filter_map(|&p| card(p, false)));
        cards.extend(
            (0..self.registry.len())
                .filter(|&p| !matching[p])
                .filter_map(|p| card(p, false)),
        );

        let suggestions = if self.view.is_empty() && !self.criteria.query.trim().is_empty() {
            suggest_titles(&self.registry, &self.criteria.query)
        } else {
            Vec::new()
        };

        GalleryViewModel {
            cards,
            matched: self.view.len(),
            total: self.registry.len(),
            reveal_limit: self.pagination.reveal_limit(),
            has_more: reveal.has_more,
            criteria: self.criteria.clone(),
            options: FilterOptions {
                decades: self.registry.decades(),
                countries: self.registry.countries(),
                genres: self.registry.genres(),
                sort_modes: SortMode::ALL.iter().map(|m| m.as_str()).collect(),
            },
            panel: self.compute_panel(),
            stats: rating_stats(&self.registry, &self.view),
            suggestions,
            theme: Theme::for_preference(self.theme),
        }
    }

    fn compute_panel(&self) -> Option<PanelView> {
        let identity = self.panel.identity.as_deref()?;
        let movie = self.registry.by_identity(identity)?;

        let metadata = &self.panel.metadata;
        let fields = |pick: fn(&MetadataRecord) -> &FieldValue| match metadata {
            MetadataSlot::Empty => FieldView::Empty,
            MetadataSlot::Loading => FieldView::Loading,
            MetadataSlot::Ready(record) => FieldView::from(pick(record)),
            MetadataSlot::Unknown => FieldView::Unknown,
        };

        let media = match &self.panel.media {
            MediaSlot::Empty => MediaView::Empty,
            MediaSlot::Loading => MediaView::Loading,
            MediaSlot::Ready(trailer) => MediaView::Trailer {
                video_id: trailer.video_id.clone(),
                site: trailer.site.clone(),
                embed_url: trailer.embed_url(),
            },
            MediaSlot::Unavailable => MediaView::Unavailable,
        };

        Some(PanelView {
            identity: movie.identity.clone(),
            title: movie.title.clone(),
            year: movie.year,
            rating: movie.rating,
            background: movie.poster.clone(),
            favorite: self.favorites.contains(&movie.identity),
            plot: fields(|r| &r.plot),
            director: fields(|r| &r.director),
            actors: fields(|r| &r.actors),
            genre: fields(|r| &r.genre),
            runtime: fields(|r| &r.runtime),
            released: fields(|r| &r.released),
            box_office: fields(|r| &r.box_office),
            awards: fields(|r| &r.awards),
            media,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::DecadeFilter;

    fn state_with(count: usize, page_size: usize) -> AppState {
        let movies = (0..count)
            .map(|i| {
                let year = 1990 + i32::try_from(i).unwrap();
                Movie::new(format!("tt{i:03}"), format!("Movie {i}"), Some(year), Some(7.0))
            })
            .collect();
        let registry = ItemRegistry::from_movies(movies).unwrap();
        let settings = SessionSettings {
            page_size,
            random_seed: Some(7),
            ..SessionSettings::default()
        };
        AppState::new(Arc::new(registry), Preferences::default(), &settings)
    }

    #[test]
    fn viewmodel_lists_every_item_with_visibility() {
        let mut state = state_with(20, 4);
        state.criteria.decade = DecadeFilter::Decade(1990);
        state.criteria_changed();

        let frame = state.compute_viewmodel();
        assert_eq!(frame.total, 20);
        assert_eq!(frame.matched, 10);
        assert_eq!(frame.cards.len(), 20);
        assert_eq!(frame.cards.iter().filter(|c| c.visible).count(), 4);
        assert!(frame.has_more);

        // Matching items lead, in view order; non-matching ones follow hidden.
        assert_eq!(frame.cards[0].identity, "tt000");
        assert_eq!(frame.cards[9].identity, "tt009");
        assert_eq!(frame.cards[10].identity, "tt010");
        assert!(!frame.cards[10].visible);
    }

    #[test]
    fn load_more_never_changes_matches() {
        let mut state = state_with(30, 12);
        let before = state.view.clone();
        state.pagination.advance_page();
        assert_eq!(state.view, before);
        assert_eq!(
            state.compute_viewmodel().cards.iter().filter(|c| c.visible).count(),
            24
        );
    }

    #[test]
    fn random_pick_stays_inside_view() {
        let mut state = state_with(30, 12);
        state.criteria.decade = DecadeFilter::Decade(2000);
        state.criteria_changed();

        for _ in 0..50 {
            let picked = state.random_in_view().unwrap();
            let movie = state.movie(&picked).unwrap();
            assert_eq!(movie.decade(), Some(2000));
        }
    }

    #[test]
    fn random_pick_on_empty_view_is_none() {
        let mut state = state_with(5, 12);
        state.criteria.favorites_only = true;
        state.criteria_changed();
        assert!(state.random_in_view().is_none());
    }

    #[test]
    fn suggestions_only_when_query_matches_nothing() {
        let mut state = state_with(5, 12);
        state.criteria.query = "Movie 3".into();
        state.criteria_changed();
        assert!(state.compute_viewmodel().suggestions.is_empty());

        state.criteria.query = "Movie 3x".into();
        state.criteria_changed();
        let frame = state.compute_viewmodel();
        assert_eq!(frame.matched, 0);
        assert!(frame.suggestions.is_empty());

        state.criteria.query = "mvie".into();
        state.criteria_changed();
        assert_eq!(state.compute_viewmodel().suggestions.len(), 5);
    }
}
