//! Render sinks: where frames and notices go.

use crate::ui::{GalleryViewModel, Notice};
use serde::Serialize;
use std::io::Write;

/// Receives every rendered frame and notice.
pub trait RenderSink: Send {
    fn render(&mut self, frame: &GalleryViewModel);
    fn notify(&mut self, notice: Notice);
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Line<'a> {
    Frame(&'a GalleryViewModel),
    Notice { notice: Notice, message: &'static str },
}

/// Writes one JSON object per line.
///
/// Frames look like `{"type":"frame", "cards": [...], ...}` and notices like
/// `{"type":"notice","notice":"no_matches","message":"..."}`. Write errors are
/// logged and dropped; a broken pipe must not take the event loop down.
pub struct JsonLinesSink<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &Line<'_>) {
        let result = serde_json::to_writer(&mut self.out, line)
            .map_err(std::io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"))
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to write output line");
        }
    }
}

impl<W: Write + Send> RenderSink for JsonLinesSink<W> {
    fn render(&mut self, frame: &GalleryViewModel) {
        self.write_line(&Line::Frame(frame));
    }

    fn notify(&mut self, notice: Notice) {
        self.write_line(&Line::Notice {
            notice,
            message: notice.message(),
        });
    }
}
