//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler never performs I/O. It returns a `Vec<Action>` after each
//! event and the runtime executes them in order within the same turn, so a state
//! change and the side effect it implies are never interleaved with another
//! event.
//!
//! # Example
//!
//! ```rust
//! use marquee::app::Action;
//!
//! let actions = vec![
//!     Action::FetchMetadata { identity: "tt0468569".into() },
//!     Action::PersistFavorites(vec!["tt0468569".into()]),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::app::focus::DebounceTicket;
use crate::storage::ThemePreference;
use crate::ui::Notice;
use std::time::Duration;

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Starts the metadata debounce timer.
    ///
    /// Any timer still pending is cancelled first; when this one elapses the
    /// runtime posts `Event::DebounceElapsed { ticket }`.
    ScheduleMetadata {
        ticket: DebounceTicket,
        identity: String,
        delay: Duration,
    },

    /// Cancels the pending debounce timer, if any.
    CancelDebounce,

    /// Fetches metadata now and posts `Event::MetadataResolved`.
    FetchMetadata { identity: String },

    /// Fetches a trailer now and posts `Event::TrailerResolved`.
    FetchTrailer { identity: String, language: String },

    /// Writes the full favorites list through to the preference store.
    PersistFavorites(Vec<String>),

    /// Writes the theme through to the preference store.
    PersistTheme(ThemePreference),

    /// Shows a user-visible notice.
    Notify(Notice),

    /// Stops the event loop.
    Quit,
}
