//! Gallery engine: everything that turns the registry plus user criteria into an
//! ordered, paginated view.
//!
//! # Organization
//!
//! - [`criteria`]: Filter and sort inputs
//! - [`engine`]: Pure predicate + stable sort ([`compute_view`])
//! - [`pagination`]: Reveal limit and "load more"
//! - [`stats`]: Rating summary of the current view
//! - [`suggest`]: Close-match titles for empty results

pub mod criteria;
pub mod engine;
pub mod pagination;
pub mod stats;
pub mod suggest;

pub use criteria::{
    CountryFilter, DecadeFilter, FilterCriteria, GenreFilter, ParseCriteriaError, RatingFloor,
    SortMode, YearRange,
};
pub use engine::{compute_view, TitleCollator};
pub use pagination::{Pagination, Reveal, DEFAULT_PAGE_SIZE};
pub use stats::{rating_stats, RatedTitle, RatingStats};
pub use suggest::{suggest_titles, Suggestion, MAX_SUGGESTIONS};
