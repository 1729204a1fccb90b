//! Application layer coordinating state, events, and actions.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └────── Async continuations ───────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`focus`]: Focus token, debounce tickets and panel slots
//! - [`handler`]: Event processing and state transitions
//! - [`state`]: Central state container and view model computation

pub mod actions;
pub mod focus;
pub mod handler;
pub mod state;

pub use actions::Action;
pub use focus::{DebounceTicket, FocusOrigin, FocusState, MediaSlot, MetadataSlot, PanelState};
pub use handler::{handle_event, Event};
pub use state::{AppState, SessionSettings};
