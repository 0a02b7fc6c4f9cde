//! Runtime event relay
//!
//! Turns an NDJSON stream of runtime events into bus events:
//!
//! ```text
//! {"type":"function.invoked","functionID":"api-handler"}
//! {"type":"worker.stdout","functionID":"api-handler","message":"cold start"}
//! {"type":"function.success","functionID":"api-handler"}
//! ```

use std::io::{BufRead, BufReader, Read};
use std::sync::Arc;
use std::thread::JoinHandle;

use serde::Deserialize;

use crate::domain::ports::{DevEvent, DevEventSink};
use crate::error::StackResult;
use crate::infrastructure::bus::{BusEvent, EventBus};

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum RuntimeEvent {
    #[serde(rename = "function.invoked")]
    Invoked {
        #[serde(rename = "functionID")]
        function_id: String,
    },
    #[serde(rename = "worker.stdout")]
    Stdout {
        #[serde(rename = "functionID")]
        function_id: String,
        message: String,
    },
    #[serde(rename = "function.success")]
    Success {
        #[serde(rename = "functionID")]
        function_id: String,
    },
}

impl From<RuntimeEvent> for BusEvent {
    fn from(event: RuntimeEvent) -> Self {
        match event {
            RuntimeEvent::Invoked { function_id } => BusEvent::FunctionInvoked { function_id },
            RuntimeEvent::Stdout {
                function_id,
                message,
            } => BusEvent::WorkerStdout {
                function_id,
                message,
            },
            RuntimeEvent::Success { function_id } => BusEvent::FunctionSuccess { function_id },
        }
    }
}

/// Parse one NDJSON line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<BusEvent>, serde_json::Error> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let event: RuntimeEvent = serde_json::from_str(line)?;
    Ok(Some(event.into()))
}

/// Counts from one relay run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    pub published: usize,
    pub rejected: usize,
}

pub struct RuntimeEventRelay {
    bus: EventBus,
    sink: Arc<dyn DevEventSink>,
}

impl RuntimeEventRelay {
    pub fn new(bus: EventBus, sink: Arc<dyn DevEventSink>) -> Self {
        Self { bus, sink }
    }

    /// Relay every line of `reader` until EOF.
    ///
    /// Lines that are not runtime events are reported as warnings and
    /// skipped; only read errors end the relay early.
    pub fn relay(&self, reader: impl BufRead) -> StackResult<RelayStats> {
        let mut stats = RelayStats::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            match parse_line(&line) {
                Ok(Some(event)) => {
                    self.bus.publish(event);
                    stats.published += 1;
                }
                Ok(None) => {}
                Err(e) => {
                    stats.rejected += 1;
                    self.sink.on_event(DevEvent::Warning {
                        message: format!("runtime event line {}: {}", index + 1, e),
                    });
                }
            }
        }
        Ok(stats)
    }

    /// Relay on a background thread. The thread ends at EOF.
    pub fn spawn(self, reader: Box<dyn Read + Send>) -> StackResult<JoinHandle<()>> {
        let handle = std::thread::Builder::new()
            .name("stackdev-runtime-events".to_string())
            .spawn(move || {
                if let Err(e) = self.relay(BufReader::new(reader)) {
                    self.sink.on_event(DevEvent::Warning {
                        message: format!("runtime event stream closed: {}", e),
                    });
                }
            })?;
        Ok(handle)
    }
}
