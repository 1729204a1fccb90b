//! Rendering boundary.
//!
//! The core never draws anything. It projects state into a [`GalleryViewModel`]
//! and hands it to whatever sink the host installed:
//!
//! ```text
//! AppState → compute_viewmodel → GalleryViewModel → RenderSink
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Frame, card, panel and notice types
//! - [`theme`]: Light and dark palettes

pub mod theme;
pub mod viewmodel;

pub use theme::{Theme, ThemeColors};
pub use viewmodel::{
    CardView, FieldView, FilterOptions, GalleryViewModel, MediaView, Notice, PanelView,
};
