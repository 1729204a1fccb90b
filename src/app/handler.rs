//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place that mutates [`AppState`]. It never blocks
//! and never performs I/O; anything effectful comes back as an [`Action`].
//!
//! # Event Types
//!
//! - **Criteria**: `SearchChanged`, `DecadeSelected`, `CountrySelected`,
//!   `GenreSelected`, `FavoritesOnly`, `SortChanged`, `ResetFilters`
//! - **Pagination**: `LoadMore`
//! - **Preferences**: `ToggleFavorite`, `ToggleTheme`
//! - **Focus**: `Focus`, `RandomPick`, `AutoSelect`
//! - **Async continuations**: `DebounceElapsed`, `MetadataResolved`, `TrailerResolved`
//!
//! # Example
//!
//! ```rust
//! use marquee::app::{handle_event, AppState, Event, SessionSettings};
//! use marquee::catalog::ItemRegistry;
//! use marquee::domain::Movie;
//! use marquee::storage::Preferences;
//! use std::sync::Arc;
//!
//! let registry = ItemRegistry::from_movies(vec![
//!     Movie::new("tt0468569", "The Dark Knight", Some(2008), Some(9.0)),
//! ])?;
//! let mut state = AppState::new(Arc::new(registry), Preferences::default(), &SessionSettings::default());
//!
//! let (render, actions) = handle_event(&mut state, &Event::SearchChanged("dark".into()))?;
//! assert!(render);
//! assert!(actions.is_empty());
//! # Ok::<(), marquee::MarqueeError>(())
//! ```

use super::focus::{DebounceTicket, FocusOrigin, MediaSlot, MetadataSlot};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{MetadataRecord, TrailerRef};
use crate::gallery::{
    CountryFilter, DecadeFilter, FilterCriteria, GenreFilter, RatingFloor, SortMode, YearRange,
};
use crate::ui::Notice;

/// Events triggered by user input or by async continuations.
///
/// The runtime feeds these to [`handle_event`] strictly one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// New free-text title query.
    SearchChanged(String),
    DecadeSelected(DecadeFilter),
    CountrySelected(CountryFilter),
    /// Genre tag click or dropdown.
    GenreSelected(GenreFilter),
    MinRatingSelected(RatingFloor),
    YearRangeSelected(YearRange),
    FavoritesOnly(bool),
    SortChanged(SortMode),
    /// Restores default criteria.
    ResetFilters,

    /// Reveals one more page.
    LoadMore,

    ToggleFavorite(String),
    ToggleTheme,

    /// Hover or selection of an item.
    Focus { identity: String, origin: FocusOrigin },
    /// Focuses a uniformly random item of the current view.
    RandomPick,
    /// Focuses the first item of the current view, bypassing the debounce.
    AutoSelect,

    /// The debounce timer identified by `ticket` ran out.
    DebounceElapsed { ticket: DebounceTicket },
    MetadataResolved {
        identity: String,
        record: Option<MetadataRecord>,
    },
    TrailerResolved {
        identity: String,
        trailer: Option<TrailerRef>,
    },

    Quit,
}

impl Event {
    /// Short name for spans and logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SearchChanged(_) => "search_changed",
            Self::DecadeSelected(_) => "decade_selected",
            Self::CountrySelected(_) => "country_selected",
            Self::GenreSelected(_) => "genre_selected",
            Self::MinRatingSelected(_) => "min_rating_selected",
            Self::YearRangeSelected(_) => "year_range_selected",
            Self::FavoritesOnly(_) => "favorites_only",
            Self::SortChanged(_) => "sort_changed",
            Self::ResetFilters => "reset_filters",
            Self::LoadMore => "load_more",
            Self::ToggleFavorite(_) => "toggle_favorite",
            Self::ToggleTheme => "toggle_theme",
            Self::Focus { .. } => "focus",
            Self::RandomPick => "random_pick",
            Self::AutoSelect => "auto_select",
            Self::DebounceElapsed { .. } => "debounce_elapsed",
            Self::MetadataResolved { .. } => "metadata_resolved",
            Self::TrailerResolved { .. } => "trailer_resolved",
            Self::Quit => "quit",
        }
    }

    #[must_use]
    pub fn hover(identity: impl Into<String>) -> Self {
        Self::Focus {
            identity: identity.into(),
            origin: FocusOrigin::Pointer,
        }
    }

    #[must_use]
    pub fn select(identity: impl Into<String>) -> Self {
        Self::Focus {
            identity: identity.into(),
            origin: FocusOrigin::Programmatic,
        }
    }
}

/// Applies a criteria mutation; resets pagination only if something changed.
fn update_criteria(
    state: &mut AppState,
    mutate: impl FnOnce(&mut FilterCriteria),
) -> Result<(bool, Vec<Action>)> {
    let before = state.criteria.clone();
    mutate(&mut state.criteria);

    if state.criteria == before {
        tracing::trace!("criteria unchanged, skipping recompute");
        return Ok((false, vec![]));
    }

    state.criteria_changed();
    tracing::debug!(
        matched = state.view.len(),
        reveal_limit = state.pagination.reveal_limit(),
        "criteria changed"
    );
    Ok((true, vec![]))
}

/// Moves focus to `identity` and emits the enrichment actions for it.
fn focus(state: &mut AppState, identity: &str, origin: FocusOrigin) -> Result<(bool, Vec<Action>)> {
    if state.movie(identity).is_none() {
        tracing::debug!(identity, "ignoring focus on unknown identity");
        return Ok((false, vec![]));
    }

    let mut actions = vec![];
    state.focus.set_current(identity);
    state.panel.show(identity);

    if state.focus.switch_media(identity) {
        state.panel.media = MediaSlot::Loading;
        actions.push(Action::FetchTrailer {
            identity: identity.to_string(),
            language: state.trailer_language.clone(),
        });
    }

    if state.focus.is_fetching(identity) {
        tracing::debug!(identity, "metadata already requested, awaiting result");
        if state.focus.cancel_pending() {
            actions.push(Action::CancelDebounce);
        }
        return Ok((true, actions));
    }

    match origin {
        FocusOrigin::Pointer => {
            let ticket = state.focus.issue_ticket();
            tracing::debug!(identity, ticket = ticket.value(), "metadata debounced");
            actions.push(Action::ScheduleMetadata {
                ticket,
                identity: identity.to_string(),
                delay: state.debounce,
            });
        }
        FocusOrigin::Programmatic => {
            if state.focus.cancel_pending() {
                actions.push(Action::CancelDebounce);
            }
            state.focus.start_fetch(identity);
            actions.push(Action::FetchMetadata {
                identity: identity.to_string(),
            });
        }
    }

    Ok((true, actions))
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is the needs-render flag.
///
/// # Errors
///
/// Reserved for state transitions that can fail; every current event is
/// infallible, including provider failures, which arrive as absent values.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.kind()).entered();

    match event {
        Event::SearchChanged(query) => update_criteria(state, |c| c.query.clone_from(query)),
        Event::DecadeSelected(decade) => update_criteria(state, |c| c.decade = *decade),
        Event::CountrySelected(country) => {
            update_criteria(state, |c| c.country.clone_from(country))
        }
        Event::GenreSelected(genre) => update_criteria(state, |c| c.genre.clone_from(genre)),
        Event::MinRatingSelected(floor) => update_criteria(state, |c| c.min_rating = *floor),
        Event::YearRangeSelected(years) => update_criteria(state, |c| c.years = *years),
        Event::FavoritesOnly(enabled) => update_criteria(state, |c| c.favorites_only = *enabled),
        Event::SortChanged(sort) => update_criteria(state, |c| c.sort = *sort),
        Event::ResetFilters => update_criteria(state, |c| *c = FilterCriteria::default()),

        Event::LoadMore => {
            if !state.pagination.reveal(&state.view).has_more {
                return Ok((false, vec![]));
            }
            state.pagination.advance_page();
            tracing::debug!(reveal_limit = state.pagination.reveal_limit(), "page advanced");
            Ok((true, vec![]))
        }

        Event::ToggleFavorite(identity) => {
            if state.movie(identity).is_none() {
                tracing::debug!(identity = %identity, "ignoring favorite toggle on unknown identity");
                return Ok((false, vec![]));
            }
            let now_favorite = state.favorites.toggle(identity);
            tracing::debug!(identity = %identity, now_favorite, "favorite toggled");

            if state.criteria.favorites_only {
                state.apply_filters();
            }
            Ok((
                true,
                vec![Action::PersistFavorites(state.favorites.to_sorted_vec())],
            ))
        }
        Event::ToggleTheme => {
            state.theme = state.theme.toggled();
            tracing::debug!(theme = %state.theme, "theme toggled");
            Ok((true, vec![Action::PersistTheme(state.theme)]))
        }

        Event::Focus { identity, origin } => focus(state, identity, *origin),
        Event::RandomPick => match state.random_in_view() {
            Some(identity) => {
                tracing::debug!(identity = %identity, "random pick");
                focus(state, &identity, FocusOrigin::Programmatic)
            }
            None => {
                tracing::debug!("random pick over empty view");
                Ok((false, vec![Action::Notify(Notice::NoMatches)]))
            }
        },
        Event::AutoSelect => match state.first_in_view() {
            Some(identity) => focus(state, &identity, FocusOrigin::Programmatic),
            None => Ok((false, vec![])),
        },

        Event::DebounceElapsed { ticket } => {
            if !state.focus.take_pending(*ticket) {
                tracing::trace!(ticket = ticket.value(), "superseded debounce ignored");
                return Ok((false, vec![]));
            }
            let Some(identity) = state.focus.current().map(str::to_string) else {
                return Ok((false, vec![]));
            };
            state.focus.start_fetch(&identity);
            Ok((false, vec![Action::FetchMetadata { identity }]))
        }
        Event::MetadataResolved { identity, record } => {
            state.focus.finish_fetch(identity);
            if !state.focus.is_current(identity) {
                tracing::debug!(identity = %identity, "discarding stale metadata");
                return Ok((false, vec![]));
            }
            // A resolution for the live focus supersedes any debounce still waiting.
            state.focus.cancel_pending();
            state.panel.metadata = record
                .clone()
                .map_or(MetadataSlot::Unknown, MetadataSlot::Ready);
            Ok((true, vec![]))
        }
        Event::TrailerResolved { identity, trailer } => {
            if state.focus.media_identity() != Some(identity.as_str()) {
                tracing::debug!(identity = %identity, "discarding stale trailer");
                return Ok((false, vec![]));
            }
            state.panel.media = trailer
                .clone()
                .map_or(MediaSlot::Unavailable, MediaSlot::Ready);
            Ok((true, vec![]))
        }

        Event::Quit => Ok((false, vec![Action::Quit])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SessionSettings;
    use crate::catalog::ItemRegistry;
    use crate::domain::{FieldValue, Movie};
    use crate::storage::{Preferences, ThemePreference};
    use std::sync::Arc;
    use std::time::Duration;

    fn state() -> AppState {
        let movies = vec![
            Movie::new("tt0111161", "The Shawshank Redemption", Some(1994), Some(9.3))
                .with_countries(vec!["United States".into()]),
            Movie::new("tt0120737", "The Lord of the Rings", Some(1999), Some(8.9))
                .with_countries(vec!["New Zealand".into()]),
            Movie::new("tt0468569", "The Dark Knight", Some(2004), Some(9.0))
                .with_countries(vec!["United States".into()]),
        ];
        let settings = SessionSettings {
            page_size: 2,
            random_seed: Some(42),
            ..SessionSettings::default()
        };
        AppState::new(
            Arc::new(ItemRegistry::from_movies(movies).unwrap()),
            Preferences::default(),
            &settings,
        )
    }

    fn record(plot: &str) -> MetadataRecord {
        MetadataRecord {
            plot: FieldValue::Known(plot.into()),
            ..MetadataRecord::default()
        }
    }

    #[test]
    fn criteria_change_resets_page() {
        let mut state = state();
        handle_event(&mut state, &Event::LoadMore).unwrap();
        assert_eq!(state.pagination.reveal_limit(), 4);

        let (render, _) = handle_event(&mut state, &Event::SortChanged(SortMode::TitleAsc)).unwrap();
        assert!(render);
        assert_eq!(state.pagination.reveal_limit(), 2);
    }

    #[test]
    fn unchanged_criteria_is_a_no_op() {
        let mut state = state();
        handle_event(&mut state, &Event::LoadMore).unwrap();
        let (render, _) =
            handle_event(&mut state, &Event::DecadeSelected(DecadeFilter::All)).unwrap();
        assert!(!render);
        assert_eq!(state.pagination.reveal_limit(), 4);
    }

    #[test]
    fn rating_and_year_filters_reset_page_and_narrow_view() {
        let mut state = state();
        handle_event(&mut state, &Event::LoadMore).unwrap();

        let (render, _) = handle_event(
            &mut state,
            &Event::MinRatingSelected(RatingFloor::AtLeast(9.0)),
        )
        .unwrap();
        assert!(render);
        assert_eq!(state.pagination.reveal_limit(), 2);
        assert_eq!(state.view, vec![0, 2]);

        handle_event(&mut state, &Event::LoadMore).unwrap();
        handle_event(
            &mut state,
            &Event::YearRangeSelected(YearRange::new(Some(1999), Some(2004))),
        )
        .unwrap();
        assert_eq!(state.pagination.reveal_limit(), 2);
        assert_eq!(state.view, vec![2]);

        let (render, _) = handle_event(
            &mut state,
            &Event::YearRangeSelected(YearRange::new(Some(1999), Some(2004))),
        )
        .unwrap();
        assert!(!render);

        handle_event(&mut state, &Event::ResetFilters).unwrap();
        assert_eq!(state.criteria.min_rating, RatingFloor::All);
        assert!(state.criteria.years.is_open());
        assert_eq!(state.view, vec![0, 1, 2]);
    }

    #[test]
    fn load_more_stops_when_everything_is_shown() {
        let mut state = state();
        assert!(handle_event(&mut state, &Event::LoadMore).unwrap().0);
        assert!(!handle_event(&mut state, &Event::LoadMore).unwrap().0);
        assert_eq!(state.pagination.reveal_limit(), 4);
    }

    #[test]
    fn toggling_favorite_under_favorites_only_refilters() {
        let mut state = state();
        handle_event(&mut state, &Event::ToggleFavorite("tt0468569".into())).unwrap();
        handle_event(&mut state, &Event::FavoritesOnly(true)).unwrap();
        assert_eq!(state.view, vec![2]);

        let (_, actions) =
            handle_event(&mut state, &Event::ToggleFavorite("tt0468569".into())).unwrap();
        assert!(state.view.is_empty());
        assert_eq!(actions, vec![Action::PersistFavorites(vec![])]);
    }

    #[test]
    fn favorites_only_with_no_favorites_is_empty() {
        let mut state = state();
        handle_event(&mut state, &Event::SearchChanged("the".into())).unwrap();
        handle_event(&mut state, &Event::FavoritesOnly(true)).unwrap();
        assert!(state.view.is_empty());
    }

    #[test]
    fn theme_toggle_persists() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::ToggleTheme).unwrap();
        assert_eq!(actions, vec![Action::PersistTheme(ThemePreference::Dark)]);
    }

    #[test]
    fn hover_fetches_trailer_now_and_debounces_metadata() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &Event::hover("tt0111161")).unwrap();
        assert!(render);
        assert_eq!(state.panel.metadata, MetadataSlot::Loading);
        assert_eq!(state.panel.media, MediaSlot::Loading);

        let ticket = state.focus.pending().unwrap();
        assert_eq!(
            actions,
            vec![
                Action::FetchTrailer {
                    identity: "tt0111161".into(),
                    language: "en-US".into(),
                },
                Action::ScheduleMetadata {
                    ticket,
                    identity: "tt0111161".into(),
                    delay: Duration::from_millis(300),
                },
            ]
        );

        let (_, actions) =
            handle_event(&mut state, &Event::DebounceElapsed { ticket }).unwrap();
        assert_eq!(
            actions,
            vec![Action::FetchMetadata {
                identity: "tt0111161".into()
            }]
        );
    }

    #[test]
    fn rehover_same_item_skips_trailer_reload() {
        let mut state = state();
        handle_event(&mut state, &Event::hover("tt0111161")).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::hover("tt0111161")).unwrap();
        assert!(actions
            .iter()
            .all(|a| !matches!(a, Action::FetchTrailer { .. })));
    }

    #[test]
    fn rehover_while_fetching_waits_for_outstanding_request() {
        let mut state = state();
        handle_event(&mut state, &Event::hover("tt0111161")).unwrap();
        let ticket = state.focus.pending().unwrap();
        handle_event(&mut state, &Event::DebounceElapsed { ticket }).unwrap();

        let (render, actions) = handle_event(&mut state, &Event::hover("tt0111161")).unwrap();
        assert!(render);
        assert!(actions.is_empty(), "unexpected actions: {actions:?}");
        assert!(state.focus.pending().is_none());

        handle_event(
            &mut state,
            &Event::MetadataResolved {
                identity: "tt0111161".into(),
                record: Some(record("Two imprisoned men bond.")),
            },
        )
        .unwrap();
        let (_, actions) = handle_event(&mut state, &Event::hover("tt0111161")).unwrap();
        assert!(actions
            .iter()
            .any(|a| matches!(a, Action::ScheduleMetadata { .. })));
    }

    #[test]
    fn returning_to_fetching_item_cancels_other_debounce() {
        let mut state = state();
        handle_event(&mut state, &Event::select("tt0111161")).unwrap();
        handle_event(&mut state, &Event::hover("tt0120737")).unwrap();
        assert!(state.focus.pending().is_some());

        let (_, actions) = handle_event(&mut state, &Event::hover("tt0111161")).unwrap();
        assert!(state.focus.pending().is_none());
        assert!(actions.contains(&Action::CancelDebounce));
        assert!(actions.iter().all(|a| !matches!(
            a,
            Action::ScheduleMetadata { .. } | Action::FetchMetadata { .. }
        )));
    }

    #[test]
    fn superseded_debounce_does_nothing() {
        let mut state = state();
        handle_event(&mut state, &Event::hover("tt0111161")).unwrap();
        let first = state.focus.pending().unwrap();
        handle_event(&mut state, &Event::hover("tt0120737")).unwrap();

        let (render, actions) =
            handle_event(&mut state, &Event::DebounceElapsed { ticket: first }).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn programmatic_focus_bypasses_debounce() {
        let mut state = state();
        handle_event(&mut state, &Event::hover("tt0111161")).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::select("tt0120737")).unwrap();

        assert!(state.focus.pending().is_none());
        assert!(actions.contains(&Action::CancelDebounce));
        assert!(actions.contains(&Action::FetchMetadata {
            identity: "tt0120737".into()
        }));
    }

    #[test]
    fn stale_metadata_is_discarded() {
        let mut state = state();
        handle_event(&mut state, &Event::select("tt0111161")).unwrap();
        handle_event(&mut state, &Event::select("tt0120737")).unwrap();

        handle_event(
            &mut state,
            &Event::MetadataResolved {
                identity: "tt0120737".into(),
                record: Some(record("B")),
            },
        )
        .unwrap();
        let (render, _) = handle_event(
            &mut state,
            &Event::MetadataResolved {
                identity: "tt0111161".into(),
                record: Some(record("A")),
            },
        )
        .unwrap();

        assert!(!render);
        assert_eq!(state.panel.metadata, MetadataSlot::Ready(record("B")));
    }

    #[test]
    fn absent_metadata_renders_unknown() {
        let mut state = state();
        handle_event(&mut state, &Event::select("tt0111161")).unwrap();
        handle_event(
            &mut state,
            &Event::MetadataResolved {
                identity: "tt0111161".into(),
                record: None,
            },
        )
        .unwrap();
        handle_event(
            &mut state,
            &Event::TrailerResolved {
                identity: "tt0111161".into(),
                trailer: None,
            },
        )
        .unwrap();

        let panel = state.compute_viewmodel().panel.unwrap();
        assert_eq!(panel.title, "The Shawshank Redemption");
        assert_eq!(panel.plot.text(), "Unknown");
        assert_eq!(panel.director.text(), "Unknown");
        assert_eq!(panel.media, crate::ui::MediaView::Unavailable);
    }

    #[test]
    fn random_pick_on_empty_view_notifies_without_state_change() {
        let mut state = state();
        handle_event(&mut state, &Event::FavoritesOnly(true)).unwrap();
        let before_focus = state.focus.clone();
        let before_panel = state.panel.clone();

        let (render, actions) = handle_event(&mut state, &Event::RandomPick).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::Notify(Notice::NoMatches)]);
        assert_eq!(state.focus, before_focus);
        assert_eq!(state.panel, before_panel);
    }

    #[test]
    fn random_pick_focuses_item_in_view() {
        let mut state = state();
        handle_event(
            &mut state,
            &Event::CountrySelected(CountryFilter::Exact("New Zealand".into())),
        )
        .unwrap();
        let (_, actions) = handle_event(&mut state, &Event::RandomPick).unwrap();
        assert_eq!(state.focus.current(), Some("tt0120737"));
        assert!(actions.contains(&Action::FetchMetadata {
            identity: "tt0120737".into()
        }));
    }

    #[test]
    fn auto_select_focuses_first_item() {
        let mut state = state();
        handle_event(&mut state, &Event::SortChanged(SortMode::RatingDesc)).unwrap();
        handle_event(&mut state, &Event::AutoSelect).unwrap();
        assert_eq!(state.focus.current(), Some("tt0111161"));
    }

    #[test]
    fn unknown_identity_is_ignored() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &Event::hover("tt404")).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.focus.current().is_none());

        let (render, _) =
            handle_event(&mut state, &Event::ToggleFavorite("tt404".into())).unwrap();
        assert!(!render);
        assert!(state.favorites.is_empty());
    }
}
