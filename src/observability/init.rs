//! Subscriber setup.

use super::exporter::{self, SERVICE_NAME};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// Layers:
/// 1. `EnvFilter` from `RUST_LOG`, else `config.trace_level`, else `info`
/// 2. Human-readable `fmt` output on stderr (stdout carries frames)
/// 3. OpenTelemetry span export when `config.trace_file` is set
///
/// Safe to call more than once; only the first call takes effect. Failing to
/// prepare the trace file disables span export and nothing else.
///
/// # Example
///
/// ```rust
/// use marquee::observability::init_tracing;
/// use marquee::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or("info"))
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let otel_layer = config.trace_file.as_ref().and_then(|path| {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("marquee: span export disabled ({}): {e}", parent.display());
                return None;
            }
        }
        let provider = exporter::create_tracer_provider(path.clone());
        Some(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)))
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();
}
