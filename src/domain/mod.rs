//! Domain layer for the Marquee gallery.
//!
//! This module contains the core domain types, independent of storage, rendering or
//! network concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Gallery entry model and derived attributes
//! - [`metadata`]: Enrichment records (metadata fields, trailer reference)
//!
//! # Examples
//!
//! ```
//! use marquee::domain::{Movie, Result};
//!
//! fn create_movie() -> Result<Movie> {
//!     Ok(Movie::new("tt0133093", "The Matrix", Some(1999), Some(8.7)))
//! }
//! ```

pub mod error;
pub mod metadata;
pub mod movie;

pub use error::{MarqueeError, Result};
pub use metadata::{FieldValue, MetadataRecord, TrailerRef, UNKNOWN_TEXT};
pub use movie::Movie;
