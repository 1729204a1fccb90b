//! Async runtime layer.
//!
//! Drives the pure application layer on a tokio event loop: spawns provider
//! fetches, owns the cancellable debounce timer, executes persistence and
//! forwards frames to a [`RenderSink`].
//!
//! # Modules
//!
//! - [`driver`]: [`Runtime`] event loop and [`EventSender`]
//! - [`sink`]: [`RenderSink`] trait and the JSON-lines sink
//! - [`command`]: Host command parsing

pub mod command;
pub mod driver;
pub mod sink;

pub use command::{parse_command, CommandError};
pub use driver::{EventSender, Runtime};
pub use sink::{JsonLinesSink, RenderSink};
