//! Movie entry model and its derived attributes.
//!
//! A [`Movie`] is one entry of the gallery. It is built once when the catalog is
//! loaded and never mutated afterwards; everything the filters need (decade,
//! primary country, folded title) is derived at construction time.

use serde::Serialize;

/// One gallery entry.
///
/// `year` and `rating` are optional because catalog data is not always clean; the
/// sort engine treats a missing value as `0`. The first element of `countries` is
/// the primary country used by the country filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    /// Stable external identity (an IMDb id such as `tt0468569`).
    pub identity: String,
    pub title: String,
    pub year: Option<i32>,
    /// Rating on a 0–10 scale.
    pub rating: Option<f64>,
    pub countries: Vec<String>,
    pub genres: Vec<String>,
    /// Poster URL, used as the panel background.
    pub poster: Option<String>,

    #[serde(skip)]
    title_folded: String,
}

impl Movie {
    /// Creates a movie entry with derived search data.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee::domain::Movie;
    ///
    /// let movie = Movie::new("tt0468569", "The Dark Knight", Some(2008), Some(9.0))
    ///     .with_countries(vec!["United States".into(), "United Kingdom".into()]);
    /// assert_eq!(movie.decade(), Some(2000));
    /// assert_eq!(movie.primary_country(), "United States");
    /// ```
    #[must_use]
    pub fn new(
        identity: impl Into<String>,
        title: impl Into<String>,
        year: Option<i32>,
        rating: Option<f64>,
    ) -> Self {
        let title = title.into();
        Self {
            identity: identity.into(),
            title_folded: title.to_lowercase(),
            title,
            year,
            rating,
            countries: Vec::new(),
            genres: Vec::new(),
            poster: None,
        }
    }

    #[must_use]
    pub fn with_countries(mut self, countries: Vec<String>) -> Self {
        self.countries = countries;
        self
    }

    #[must_use]
    pub fn with_genres(mut self, genres: Vec<String>) -> Self {
        self.genres = genres;
        self
    }

    #[must_use]
    pub fn with_poster(mut self, poster: Option<String>) -> Self {
        self.poster = poster;
        self
    }

    /// Decade bucket, `floor(year / 10) * 10`.
    ///
    /// Uses floored division so that the bucket stays correct for the (unlikely)
    /// negative year.
    #[must_use]
    pub fn decade(&self) -> Option<i32> {
        self.year.map(|y| y.div_euclid(10) * 10)
    }

    /// First entry of the country list, or the empty string.
    #[must_use]
    pub fn primary_country(&self) -> &str {
        self.countries.first().map_or("", String::as_str)
    }

    /// Lowercased title used for substring search.
    #[must_use]
    pub fn title_folded(&self) -> &str {
        &self.title_folded
    }

    /// Year used as a sort key; missing years compare as `0`.
    #[must_use]
    pub fn sort_year(&self) -> i32 {
        self.year.unwrap_or(0)
    }

    /// Rating used as a sort key; missing ratings compare as `0.0`.
    #[must_use]
    pub fn sort_rating(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// Case-insensitive membership test against the catalog genres.
    #[must_use]
    pub fn has_genre(&self, genre: &str) -> bool {
        let wanted = genre.to_lowercase();
        self.genres.iter().any(|g| g.to_lowercase() == wanted)
    }
}
