//! Error types for the Marquee gallery core.
//!
//! This module defines the centralized error type [`MarqueeError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Provider failures are deliberately absent here: the enrichment layer has its own
//! [`ProviderError`](crate::enrichment::ProviderError) that is always collapsed into an
//! absent value before it reaches the application layer.

use thiserror::Error;

/// The main error type for Marquee operations.
///
/// Covers the conditions that can stop a startup step (loading the catalog, opening
/// the preferences file, reading configuration). Nothing in the event loop turns one
/// of these into a fatal condition; the page stays interactive.
///
/// # Examples
///
/// ```
/// use marquee::MarqueeError;
///
/// fn validate_page_size(size: usize) -> Result<(), MarqueeError> {
///     if size == 0 {
///         return Err(MarqueeError::Config("page_size must be positive".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_page_size(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum MarqueeError {
    /// The movie catalog could not be parsed.
    ///
    /// The string describes which entry or field was rejected.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Preference storage failed.
    ///
    /// Occurs when reading from or writing to the preferences backend fails.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Automatically converts from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An enrichment provider could not be constructed.
    ///
    /// Request-time failures never use this variant.
    #[error("Provider setup error: {0}")]
    Provider(String),
}

/// A specialized `Result` type for Marquee operations.
pub type Result<T> = std::result::Result<T, MarqueeError>;
