//! Enrichment layer: lazily fetched metadata and trailers for the info panel.
//!
//! # Modules
//!
//! - [`provider`]: Async provider traits and [`ProviderError`]
//! - [`omdb`]: OMDb metadata client
//! - [`trailer`]: TMDB trailer client
//! - [`pipeline`]: Session cache with soft failure

pub mod omdb;
pub mod pipeline;
pub mod provider;
pub mod trailer;

pub use omdb::{OmdbClient, DEFAULT_OMDB_URL};
pub use pipeline::EnrichmentPipeline;
pub use provider::{MetadataProvider, ProviderError, TrailerProvider};
pub use trailer::{TmdbTrailerClient, DEFAULT_TMDB_URL};
