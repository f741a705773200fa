//! Telemetry sink: an append-only JSON-lines file.
//!
//! Delivery is fire-and-forget. A failed write is logged and never aborts
//! the command that produced the events.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use luntra_analytics::TelemetryEvent;

/// A JSON-lines file that telemetry events are appended to.
#[derive(Debug, Clone)]
pub struct EventSink {
    path: PathBuf,
}

impl EventSink {
    /// Creates a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sink file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends events, one JSON object per line.
    pub fn append(&self, events: &[TelemetryEvent]) -> std::io::Result<()> {
        let mut buffer = String::new();
        for event in events {
            buffer.push_str(&event.to_json_line()?);
            buffer.push('\n');
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(buffer.as_bytes())?;
        file.flush()
    }

    /// Appends events, logging instead of failing. Returns whether the
    /// write succeeded.
    pub fn emit(&self, events: &[TelemetryEvent]) -> bool {
        match self.append(events) {
            Ok(()) => {
                tracing::debug!(count = events.len(), path = %self.path.display(), "telemetry events written");
                true
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "telemetry sink unavailable: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_append_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let sink = EventSink::new(dir.path().join("events").join("luntra.jsonl"));
        let session = Uuid::new_v4();

        sink.append(&[TelemetryEvent::session_started(session)]).unwrap();
        sink.append(&[
            TelemetryEvent::session_started(session),
            TelemetryEvent::feedback(session, 3, None).unwrap(),
        ])
        .unwrap();

        let content = std::fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let json: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(json["session_id"], session.to_string());
        }
    }

    #[test]
    fn test_emit_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        let sink = EventSink::new(dir.path());
        assert!(!sink.emit(&[TelemetryEvent::session_started(Uuid::new_v4())]));
    }
}
