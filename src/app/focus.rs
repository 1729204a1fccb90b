//! Focus and panel state for the hover-driven info panel.
//!
//! # State Machine
//!
//! ```text
//! Idle ──focus──► Immediate-render ──(media identity changed)──► trailer fetch
//!                        │
//!                        ├─ pointer:      debounce ticket ──elapsed──► metadata fetch
//!                        └─ programmatic: metadata fetch (no debounce)
//!
//! resolution ──(identity still current)──► slots updated
//!            ──(focus moved on)──────────► discarded
//! ```
//!
//! Cancellation is logical: an in-flight request is never aborted, its result is
//! just compared against the live focus when it comes back. Focusing an identity
//! whose request is still outstanding waits for that result instead of asking
//! again.

use crate::domain::{MetadataRecord, TrailerRef};
use serde::{Deserialize, Serialize};

/// How a focus change was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusOrigin {
    /// Hover or similar user pointer movement. Metadata is debounced.
    Pointer,
    /// Auto-selection or random pick. Metadata is fetched immediately.
    Programmatic,
}

/// Identifies one scheduled debounce. Only the most recently issued ticket is
/// ever honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DebounceTicket(u64);

impl DebounceTicket {
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// The live focus token plus the single pending debounce.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusState {
    current: Option<String>,
    pending: Option<DebounceTicket>,
    next_ticket: u64,
    media_identity: Option<String>,
    in_flight: Option<String>,
}

impl FocusState {
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    #[must_use]
    pub fn is_current(&self, identity: &str) -> bool {
        self.current.as_deref() == Some(identity)
    }

    #[must_use]
    pub const fn pending(&self) -> Option<DebounceTicket> {
        self.pending
    }

    /// Identity whose trailer is shown or loading.
    #[must_use]
    pub fn media_identity(&self) -> Option<&str> {
        self.media_identity.as_deref()
    }

    pub fn set_current(&mut self, identity: &str) {
        self.current = Some(identity.to_string());
    }

    /// Records a new media identity. Returns `false` when it is unchanged, in
    /// which case no new trailer load is needed.
    pub fn switch_media(&mut self, identity: &str) -> bool {
        if self.media_identity.as_deref() == Some(identity) {
            return false;
        }
        self.media_identity = Some(identity.to_string());
        true
    }

    /// Issues a fresh ticket, replacing any pending one.
    pub fn issue_ticket(&mut self) -> DebounceTicket {
        self.next_ticket += 1;
        let ticket = DebounceTicket(self.next_ticket);
        self.pending = Some(ticket);
        ticket
    }

    /// Consumes the pending ticket if it is `ticket`. Superseded tickets return
    /// `false`.
    pub fn take_pending(&mut self, ticket: DebounceTicket) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Clears the pending ticket. Returns whether one was pending.
    pub fn cancel_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Marks a metadata request for `identity` as outstanding.
    pub fn start_fetch(&mut self, identity: &str) {
        self.in_flight = Some(identity.to_string());
    }

    #[must_use]
    pub fn is_fetching(&self, identity: &str) -> bool {
        self.in_flight.as_deref() == Some(identity)
    }

    /// Clears the outstanding mark if it belongs to `identity`.
    pub fn finish_fetch(&mut self, identity: &str) {
        if self.is_fetching(identity) {
            self.in_flight = None;
        }
    }
}

/// Metadata slot contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MetadataSlot {
    #[default]
    Empty,
    Loading,
    Ready(MetadataRecord),
    /// Lookup finished without data; every field renders as unknown.
    Unknown,
}

/// Media (trailer) slot contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MediaSlot {
    #[default]
    Empty,
    Loading,
    Ready(TrailerRef),
    Unavailable,
}

/// What the panel currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    pub identity: Option<String>,
    pub metadata: MetadataSlot,
    pub media: MediaSlot,
}

impl PanelState {
    /// Points the panel at `identity`.
    ///
    /// Metadata shows `Loading` unless this same identity already has a record,
    /// so text from the previous item is never left on screen.
    pub fn show(&mut self, identity: &str) {
        let same = self.identity.as_deref() == Some(identity);
        if !(same && matches!(self.metadata, MetadataSlot::Ready(_))) {
            self.metadata = MetadataSlot::Loading;
        }
        self.identity = Some(identity.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_is_honored() {
        let mut focus = FocusState::default();
        let first = focus.issue_ticket();
        let second = focus.issue_ticket();
        assert_ne!(first, second);

        assert!(!focus.take_pending(first));
        assert!(focus.take_pending(second));
        assert!(!focus.take_pending(second), "a ticket fires at most once");
    }

    #[test]
    fn cancel_clears_pending() {
        let mut focus = FocusState::default();
        assert!(!focus.cancel_pending());
        let ticket = focus.issue_ticket();
        assert!(focus.cancel_pending());
        assert!(!focus.take_pending(ticket));
    }

    #[test]
    fn fetch_mark_clears_only_for_its_identity() {
        let mut focus = FocusState::default();
        focus.start_fetch("tt1");
        focus.finish_fetch("tt2");
        assert!(focus.is_fetching("tt1"));

        focus.finish_fetch("tt1");
        assert!(!focus.is_fetching("tt1"));
    }

    #[test]
    fn media_switch_detects_same_identity() {
        let mut focus = FocusState::default();
        assert!(focus.switch_media("tt1"));
        assert!(!focus.switch_media("tt1"));
        assert!(focus.switch_media("tt2"));
        assert_eq!(focus.media_identity(), Some("tt2"));
    }

    #[test]
    fn panel_never_keeps_previous_items_text() {
        let mut panel = PanelState::default();
        panel.show("tt1");
        panel.metadata = MetadataSlot::Ready(MetadataRecord::default());

        panel.show("tt1");
        assert!(matches!(panel.metadata, MetadataSlot::Ready(_)));

        panel.show("tt2");
        assert_eq!(panel.metadata, MetadataSlot::Loading);
    }
}
