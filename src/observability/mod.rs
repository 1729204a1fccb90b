//! Tracing setup with optional OpenTelemetry span export.
//!
//! ```text
//! tracing macros → tracing-subscriber registry ─┬→ fmt layer → stderr
//!                                               └→ tracing-opentelemetry → JSON-lines file
//! ```
//!
//! # Configuration
//!
//! Level is resolved from:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in the config file
//! 3. Default: `"info"`
//!
//! Span export is enabled by setting `trace_file`. The file rotates at 10 MiB
//! and keeps 3 backups.
//!
//! # Modules
//!
//! - [`init`]: Subscriber installation
//! - `exporter`: OpenTelemetry exporter producing one JSON line per span
//! - `file_writer`: Size-rotated file

mod exporter;
mod file_writer;
pub mod init;

pub use init::init_tracing;
