//! JSON Event Sink
//!
//! Outputs dev events as NDJSON for editors and other tooling.

use crate::domain::ports::{DevEvent, DevEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

impl DevEventSink for JsonEventSink {
    fn on_event(&self, event: DevEvent) {
        // Deploy worker and invocation logger write concurrently; one line per lock
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event.to_json());
            let _ = writer.flush();
        }
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}
