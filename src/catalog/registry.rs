//! Immutable item registry loaded once per session.
//!
//! The registry is the explicit, materialized source of truth for the gallery: the
//! filter engine reads from it instead of from rendered markup. It is built once
//! from a JSON catalog and never mutated afterwards.
//!
//! # Catalog format
//!
//! Either a bare array or an object with a `movies` array. Field parsing is lenient
//! because catalogs are usually exported from other tools:
//!
//! ```json
//! [
//!   {
//!     "id": "tt0468569",
//!     "title": "The Dark Knight",
//!     "year": "2008",
//!     "rating": 9.0,
//!     "country": "United States, United Kingdom",
//!     "genres": ["Action", "Crime", "Drama"],
//!     "poster": "https://example.org/dark-knight.jpg"
//!   }
//! ]
//! ```
//!
//! - `year` / `rating`: number or string; `"N/A"` or garbage becomes absent
//! - `country` / `countries`, `genre` / `genres`: array or comma-separated string

use crate::domain::error::{MarqueeError, Result};
use crate::domain::Movie;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawMovie {
    #[serde(alias = "id", alias = "imdb_id", alias = "imdbID")]
    identity: String,
    title: String,
    #[serde(default)]
    year: Option<Value>,
    #[serde(default)]
    rating: Option<Value>,
    #[serde(default, alias = "country")]
    countries: Option<Value>,
    #[serde(default, alias = "genre")]
    genres: Option<Value>,
    #[serde(default)]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCatalog {
    List(Vec<RawMovie>),
    Wrapped { movies: Vec<RawMovie> },
}

impl RawMovie {
    fn into_movie(self) -> Movie {
        let year = self.year.as_ref().and_then(lenient_year);
        let rating = self.rating.as_ref().and_then(lenient_rating);
        let countries = self.countries.as_ref().map(string_list).unwrap_or_default();
        let genres = self.genres.as_ref().map(string_list).unwrap_or_default();
        let poster = self
            .poster
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty() && p != "N/A");

        Movie::new(self.identity.trim(), self.title.trim(), year, rating)
            .with_countries(countries)
            .with_genres(genres)
            .with_poster(poster)
    }
}

/// Parses a year from a number or from the leading digits of a string
/// (`"2008"`, `"2008–2012"`).
fn lenient_year(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => {
            let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        }
        _ => None,
    }
}

fn lenient_rating(value: &Value) -> Option<f64> {
    let rating = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    rating.is_finite().then_some(rating)
}

fn string_list(value: &Value) -> Vec<String> {
    let parts: Vec<String> = match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };
    parts
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty() && p != "N/A")
        .collect()
}

/// The immutable set of gallery entries, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    movies: Vec<Movie>,
    index: HashMap<String, usize>,
}

impl ItemRegistry {
    /// Builds a registry from already-constructed entries.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Catalog`] if an identity is empty or appears twice.
    pub fn from_movies(movies: Vec<Movie>) -> Result<Self> {
        let mut index = HashMap::with_capacity(movies.len());
        for (position, movie) in movies.iter().enumerate() {
            if movie.identity.is_empty() {
                return Err(MarqueeError::Catalog(format!(
                    "entry {position} ({}) has an empty identity",
                    movie.title
                )));
            }
            if index.insert(movie.identity.clone(), position).is_some() {
                return Err(MarqueeError::Catalog(format!(
                    "duplicate identity: {}",
                    movie.identity
                )));
            }
        }

        tracing::debug!(movie_count = movies.len(), "item registry built");
        Ok(Self { movies, index })
    }

    /// Parses a registry from catalog JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Catalog`] for malformed JSON or invalid entries.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawCatalog = serde_json::from_str(json)
            .map_err(|e| MarqueeError::Catalog(format!("failed to parse catalog JSON: {e}")))?;
        let entries = match raw {
            RawCatalog::List(entries) | RawCatalog::Wrapped { movies: entries } => entries,
        };
        Self::from_movies(entries.into_iter().map(RawMovie::into_movie).collect())
    }

    /// Loads a registry from a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a catalog error if it
    /// cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let _span = tracing::debug_span!("load_catalog", path = %path.display()).entered();
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Entries in catalog order.
    #[must_use]
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Movie> {
        self.movies.get(position)
    }

    /// Catalog position of an identity.
    #[must_use]
    pub fn position(&self, identity: &str) -> Option<usize> {
        self.index.get(identity).copied()
    }

    #[must_use]
    pub fn by_identity(&self, identity: &str) -> Option<&Movie> {
        self.position(identity).and_then(|p| self.movies.get(p))
    }

    #[must_use]
    pub fn contains(&self, identity: &str) -> bool {
        self.index.contains_key(identity)
    }

    /// Distinct decades, ascending, for the decade dropdown.
    #[must_use]
    pub fn decades(&self) -> Vec<i32> {
        self.movies
            .iter()
            .filter_map(Movie::decade)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct non-empty primary countries, sorted.
    #[must_use]
    pub fn countries(&self) -> Vec<String> {
        self.movies
            .iter()
            .map(Movie::primary_country)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct catalog genres, sorted.
    #[must_use]
    pub fn genres(&self) -> Vec<String> {
        self.movies
            .iter()
            .flat_map(|m| m.genres.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
