//! Catalog layer: the immutable item registry.
//!
//! - [`registry`]: JSON catalog loading and identity lookup

pub mod registry;

pub use registry::ItemRegistry;
