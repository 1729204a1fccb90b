//! Predicate and sort engine.
//!
//! [`compute_view`] is a pure function from registry + criteria + favorites to the
//! ordered list of matching catalog positions. It performs no I/O and is cheap
//! enough to run on every keystroke.

use super::criteria::{FilterCriteria, SortMode};
use crate::catalog::ItemRegistry;
use crate::domain::Movie;
use crate::storage::FavoritesSet;
use icu::collator::options::CollatorOptions;
use icu::collator::{Collator, CollatorBorrowed};
use icu::locale::Locale;
use std::cmp::Ordering;
use std::fmt;

/// Locale-aware title comparison.
///
/// Falls back to a lowercase code-point comparison when the locale cannot be
/// parsed or has no collation data.
pub struct TitleCollator {
    locale: String,
    collator: Option<CollatorBorrowed<'static>>,
}

impl TitleCollator {
    #[must_use]
    pub fn new(locale: &str) -> Self {
        let collator = match locale.parse::<Locale>() {
            Ok(parsed) => match Collator::try_new(parsed.into(), CollatorOptions::default()) {
                Ok(collator) => Some(collator),
                Err(e) => {
                    tracing::warn!(locale, error = %e, "no collation data, using plain comparison");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(locale, error = %e, "invalid locale, using plain comparison");
                None
            }
        };

        Self {
            locale: locale.to_string(),
            collator,
        }
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    #[must_use]
    pub fn compare(&self, left: &str, right: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(left, right),
            None => left.to_lowercase().cmp(&right.to_lowercase()),
        }
    }
}

impl Default for TitleCollator {
    fn default() -> Self {
        Self::new("en-US")
    }
}

impl fmt::Debug for TitleCollator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TitleCollator")
            .field("locale", &self.locale)
            .field("icu", &self.collator.is_some())
            .finish()
    }
}

/// True when `movie` satisfies every dimension of `criteria`.
///
/// `folded_query` must be the already-lowercased query so that the predicate
/// does not re-fold it per item.
#[must_use]
pub fn matches(
    movie: &Movie,
    criteria: &FilterCriteria,
    folded_query: &str,
    favorites: &FavoritesSet,
) -> bool {
    (folded_query.is_empty() || movie.title_folded().contains(folded_query))
        && criteria.decade.matches(movie.decade())
        && criteria.country.matches(movie.primary_country())
        && criteria.genre.matches(movie)
        && criteria.min_rating.matches(movie.rating)
        && criteria.years.matches(movie.year)
        && (!criteria.favorites_only || favorites.contains(&movie.identity))
}

/// Orders two movies for a sort mode. Ties compare equal so a stable sort keeps
/// registry order.
fn compare(mode: SortMode, a: &Movie, b: &Movie, collator: &TitleCollator) -> Ordering {
    match mode {
        SortMode::Default => Ordering::Equal,
        SortMode::TitleAsc => collator.compare(&a.title, &b.title),
        SortMode::TitleDesc => collator.compare(&b.title, &a.title),
        SortMode::RatingDesc => b.sort_rating().total_cmp(&a.sort_rating()),
        SortMode::RatingAsc => a.sort_rating().total_cmp(&b.sort_rating()),
        SortMode::YearDesc => b.sort_year().cmp(&a.sort_year()),
        SortMode::YearAsc => a.sort_year().cmp(&b.sort_year()),
    }
}

/// Computes the ordered view: catalog positions of all matching movies.
///
/// # Examples
///
/// ```
/// use marquee::catalog::ItemRegistry;
/// use marquee::domain::Movie;
/// use marquee::gallery::{compute_view, FilterCriteria, TitleCollator};
/// use marquee::storage::FavoritesSet;
///
/// let registry = ItemRegistry::from_movies(vec![
///     Movie::new("tt1", "The Dark Knight", Some(2008), Some(9.0)),
///     Movie::new("tt2", "Amélie", Some(2001), Some(8.3)),
/// ])?;
/// let criteria = FilterCriteria { query: "DARK".into(), ..Default::default() };
///
/// let view = compute_view(&registry, &criteria, &FavoritesSet::default(), &TitleCollator::default());
/// assert_eq!(view, vec![0]);
/// # Ok::<(), marquee::MarqueeError>(())
/// ```
#[must_use]
pub fn compute_view(
    registry: &ItemRegistry,
    criteria: &FilterCriteria,
    favorites: &FavoritesSet,
    collator: &TitleCollator,
) -> Vec<usize> {
    let _span = tracing::debug_span!(
        "compute_view",
        total = registry.len(),
        sort = %criteria.sort,
        matched = tracing::field::Empty
    )
    .entered();

    let folded_query = criteria.folded_query();
    let movies = registry.movies();
    let mut view: Vec<usize> = movies
        .iter()
        .enumerate()
        .filter(|(_, movie)| matches(movie, criteria, &folded_query, favorites))
        .map(|(position, _)| position)
        .collect();

    if criteria.sort != SortMode::Default {
        view.sort_by(|&a, &b| compare(criteria.sort, &movies[a], &movies[b], collator));
    }

    tracing::Span::current().record("matched", view.len());
    view
}
