//! Single-threaded event loop that executes handler actions.
//!
//! Events are processed strictly one at a time. Network fetches and the
//! debounce timer run as spawned tasks whose only way back in is posting an
//! event onto the loop's channel, so every state mutation still happens on
//! the loop, in order.

use crate::app::{handle_event, Action, AppState, Event};
use crate::enrichment::EnrichmentPipeline;
use crate::runtime::sink::RenderSink;
use crate::storage::PreferenceStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Cloneable handle for feeding events into a [`Runtime`].
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<Event>,
}

impl EventSender {
    /// Posts an event. Returns `false` once the runtime is gone.
    pub fn send(&self, event: Event) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Owns the application state and executes the actions it produces.
pub struct Runtime {
    state: AppState,
    pipeline: Arc<EnrichmentPipeline>,
    store: Box<dyn PreferenceStore>,
    sink: Box<dyn RenderSink>,
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
    /// The single pending debounce timer.
    debounce: Option<JoinHandle<()>>,
    stopped: bool,
}

impl Runtime {
    #[must_use]
    pub fn new(
        state: AppState,
        pipeline: Arc<EnrichmentPipeline>,
        store: Box<dyn PreferenceStore>,
        sink: Box<dyn RenderSink>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state,
            pipeline,
            store,
            sink,
            tx,
            rx,
            debounce: None,
            stopped: false,
        }
    }

    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.clone(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Whether a debounce timer is currently held.
    #[must_use]
    pub fn has_pending_debounce(&self) -> bool {
        self.debounce.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Pushes the current frame to the sink.
    pub fn render(&mut self) {
        let frame = self.state.compute_viewmodel();
        self.sink.render(&frame);
    }

    /// Handles one event and executes its actions in the same turn.
    ///
    /// Must be called from within a tokio runtime, since fetches are spawned.
    pub fn dispatch(&mut self, event: Event) {
        let span = tracing::debug_span!("dispatch", event = event.kind());
        let _guard = span.enter();

        match handle_event(&mut self.state, &event) {
            Ok((needs_render, actions)) => {
                for action in actions {
                    self.execute(action, &span);
                }
                if needs_render {
                    self.render();
                }
            }
            Err(e) => tracing::error!(error = %e, "event handling failed"),
        }
    }

    /// Processes events until `Quit`.
    pub async fn run(&mut self) {
        while !self.stopped {
            let Some(event) = self.rx.recv().await else {
                break;
            };
            self.dispatch(event);
        }
        self.shutdown();
    }

    /// Processes events until `Quit` or until `duration` has passed.
    pub async fn run_for(&mut self, duration: Duration) {
        let deadline = tokio::time::Instant::now() + duration;
        while !self.stopped {
            match tokio::time::timeout_at(deadline, self.rx.recv()).await {
                Ok(Some(event)) => self.dispatch(event),
                Ok(None) | Err(_) => break,
            }
        }
    }

    fn execute(&mut self, action: Action, span: &tracing::Span) {
        match action {
            Action::ScheduleMetadata {
                ticket,
                identity,
                delay,
            } => {
                self.abort_debounce();

                // Cached metadata needs no quiet period.
                if let Some(record) = self.pipeline.cached(&identity) {
                    tracing::debug!(identity = %identity, "metadata served from cache");
                    self.post(Event::MetadataResolved {
                        identity,
                        record: Some(record),
                    });
                    return;
                }

                let tx = self.tx.clone();
                let task = async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(Event::DebounceElapsed { ticket });
                };
                self.debounce = Some(tokio::spawn(task.instrument(span.clone())));
            }
            Action::CancelDebounce => self.abort_debounce(),
            Action::FetchMetadata { identity } => {
                let pipeline = Arc::clone(&self.pipeline);
                let tx = self.tx.clone();
                let task = async move {
                    let record = pipeline.fetch_metadata(&identity).await;
                    let _ = tx.send(Event::MetadataResolved { identity, record });
                };
                tokio::spawn(task.instrument(span.clone()));
            }
            Action::FetchTrailer { identity, language } => {
                let pipeline = Arc::clone(&self.pipeline);
                let tx = self.tx.clone();
                let task = async move {
                    let trailer = pipeline.fetch_trailer(&identity, &language).await;
                    let _ = tx.send(Event::TrailerResolved { identity, trailer });
                };
                tokio::spawn(task.instrument(span.clone()));
            }
            Action::PersistFavorites(ids) => {
                if let Err(e) = self.store.save_favorites(&ids) {
                    tracing::error!(error = %e, "failed to persist favorites");
                }
            }
            Action::PersistTheme(theme) => {
                if let Err(e) = self.store.save_theme(theme) {
                    tracing::error!(error = %e, "failed to persist theme");
                }
            }
            Action::Notify(notice) => self.sink.notify(notice),
            Action::Quit => {
                tracing::debug!("quit requested");
                self.stopped = true;
            }
        }
    }

    fn post(&self, event: Event) {
        if self.tx.send(event).is_err() {
            tracing::warn!("event channel closed");
        }
    }

    fn abort_debounce(&mut self) {
        if let Some(handle) = self.debounce.take() {
            handle.abort();
        }
    }

    fn shutdown(&mut self) {
        self.abort_debounce();
        tracing::debug!(cached = self.pipeline.cached_count(), "runtime stopped");
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.abort_debounce();
    }
}
