//! Filter criteria: the single live set of user-selected filter and sort inputs.
//!
//! Every dimension has a textual form so hosts can pass dropdown values straight
//! through (`"all"`, `"1990"`, `"rating-desc"`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const ALL: &str = "all";

/// A dropdown value that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value:?}")]
pub struct ParseCriteriaError {
    kind: &'static str,
    value: String,
}

impl ParseCriteriaError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Decade dropdown selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecadeFilter {
    #[default]
    All,
    Decade(i32),
}

impl DecadeFilter {
    #[must_use]
    pub fn matches(self, decade: Option<i32>) -> bool {
        match self {
            Self::All => true,
            Self::Decade(wanted) => decade == Some(wanted),
        }
    }
}

impl FromStr for DecadeFilter {
    type Err = ParseCriteriaError;

    /// Accepts `all`, `1990` and `1990s`. The value is floored to its bucket.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(ALL) {
            return Ok(Self::All);
        }
        trimmed
            .trim_end_matches('s')
            .parse::<i32>()
            .map(|year| Self::Decade(year.div_euclid(10) * 10))
            .map_err(|_| ParseCriteriaError::new("decade", s))
    }
}

impl fmt::Display for DecadeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Decade(decade) => write!(f, "{decade}"),
        }
    }
}

/// Country dropdown selection. Matching is exact and case-sensitive on the
/// primary country.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountryFilter {
    #[default]
    All,
    Exact(String),
}

impl CountryFilter {
    #[must_use]
    pub fn matches(&self, primary_country: &str) -> bool {
        match self {
            Self::All => true,
            Self::Exact(wanted) => wanted == primary_country,
        }
    }
}

impl From<&str> for CountryFilter {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            Self::All
        } else {
            Self::Exact(trimmed.to_string())
        }
    }
}

/// Genre selection, a dimension independent from the title query.
///
/// Matching is case-insensitive against any of the item's catalog genres.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenreFilter {
    #[default]
    All,
    Named(String),
}

impl GenreFilter {
    #[must_use]
    pub fn matches(&self, movie: &crate::domain::Movie) -> bool {
        match self {
            Self::All => true,
            Self::Named(genre) => movie.has_genre(genre),
        }
    }
}

impl From<&str> for GenreFilter {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            Self::All
        } else {
            Self::Named(trimmed.to_string())
        }
    }
}

/// Minimum rating selection. A set floor is inclusive and rejects unrated items.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingFloor {
    #[default]
    All,
    AtLeast(f64),
}

impl RatingFloor {
    #[must_use]
    pub fn matches(self, rating: Option<f64>) -> bool {
        match self {
            Self::All => true,
            Self::AtLeast(floor) => rating.is_some_and(|r| r >= floor),
        }
    }
}

impl FromStr for RatingFloor {
    type Err = ParseCriteriaError;

    /// Accepts `all`, blank, or a number on the 0-10 scale.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            return Ok(Self::All);
        }
        match trimmed.parse::<f64>() {
            Ok(floor) if (0.0..=10.0).contains(&floor) => Ok(Self::AtLeast(floor)),
            _ => Err(ParseCriteriaError::new("minimum rating", s)),
        }
    }
}

impl fmt::Display for RatingFloor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::AtLeast(floor) => write!(f, "{floor}"),
        }
    }
}

/// Release year range with optional, inclusive ends.
///
/// An item without a year passes only when both ends are open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YearRange {
    pub from: Option<i32>,
    pub to: Option<i32>,
}

impl YearRange {
    #[must_use]
    pub const fn new(from: Option<i32>, to: Option<i32>) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    #[must_use]
    pub fn matches(self, year: Option<i32>) -> bool {
        if self.is_open() {
            return true;
        }
        let Some(year) = year else {
            return false;
        };
        self.from.is_none_or(|from| year >= from) && self.to.is_none_or(|to| year <= to)
    }
}

impl FromStr for YearRange {
    type Err = ParseCriteriaError;

    /// Accepts `all`, `1990-1999`, `1990-`, `-1999` or a single year.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseCriteriaError::new("year range", s);
        let bound = |text: &str| -> Result<Option<i32>, ParseCriteriaError> {
            let text = text.trim();
            if text.is_empty() {
                Ok(None)
            } else {
                text.parse::<i32>().map(Some).map_err(|_| invalid())
            }
        };

        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            return Ok(Self::default());
        }

        let range = match trimmed.split_once('-') {
            Some((from, to)) => Self::new(bound(from)?, bound(to)?),
            None => {
                let year = bound(trimmed)?;
                Self::new(year, year)
            }
        };
        match (range.from, range.to) {
            (Some(from), Some(to)) if from > to => Err(invalid()),
            _ => Ok(range),
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_open() {
            return f.write_str(ALL);
        }
        if let Some(from) = self.from {
            write!(f, "{from}")?;
        }
        f.write_str("-")?;
        if let Some(to) = self.to {
            write!(f, "{to}")?;
        }
        Ok(())
    }
}

/// Ordering applied to the matching items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Registry order.
    #[default]
    Default,
    TitleAsc,
    TitleDesc,
    RatingDesc,
    RatingAsc,
    YearDesc,
    YearAsc,
}

impl SortMode {
    pub const ALL: [Self; 7] = [
        Self::Default,
        Self::TitleAsc,
        Self::TitleDesc,
        Self::RatingDesc,
        Self::RatingAsc,
        Self::YearDesc,
        Self::YearAsc,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::TitleAsc => "title-asc",
            Self::TitleDesc => "title-desc",
            Self::RatingDesc => "rating-desc",
            Self::RatingAsc => "rating-asc",
            Self::YearDesc => "year-desc",
            Self::YearAsc => "year-asc",
        }
    }
}

impl FromStr for SortMode {
    type Err = ParseCriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseCriteriaError::new("sort mode", s))
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The live filter inputs.
///
/// Changing any field here is a criteria change and resets pagination. The
/// favorites set itself is not part of the criteria; only the "favorites only"
/// switch is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text title query, matched case-insensitively as a substring.
    pub query: String,
    pub decade: DecadeFilter,
    pub country: CountryFilter,
    pub genre: GenreFilter,
    pub min_rating: RatingFloor,
    pub years: YearRange,
    pub favorites_only: bool,
    pub sort: SortMode,
}

impl FilterCriteria {
    /// Lowercased query used by the predicate.
    ///
    /// Surrounding spaces are kept so `" dark"` only matches at a word start; a
    /// blank query folds to the empty string and matches everything.
    #[must_use]
    pub fn folded_query(&self) -> String {
        if self.query.trim().is_empty() {
            String::new()
        } else {
            self.query.to_lowercase()
        }
    }

    /// True when no dimension narrows the view.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.query.trim().is_empty()
            && self.decade == DecadeFilter::All
            && self.country == CountryFilter::All
            && self.genre == GenreFilter::All
            && self.min_rating == RatingFloor::All
            && self.years.is_open()
            && !self.favorites_only
    }
}
