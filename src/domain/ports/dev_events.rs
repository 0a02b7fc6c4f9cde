//! Dev Event Port
//!
//! Everything the control loop reports to the operator goes through
//! [`DevEventSink`]. Sinks decide presentation (console, NDJSON, silence).

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::entities::{ResourceError, UnitStatus};
use crate::domain::value_objects::Fingerprint;

/// Event emitted by the dev loop
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DevEvent {
    /// Loop started
    Started { root: PathBuf, out_dir: PathBuf },

    /// Non-fatal notice (e.g. unknown config key)
    Warning { message: String },

    /// A build input changed
    FileChanged { path: String },

    /// A file changed that did not feed the last build
    FileIgnored { path: String },

    /// Synth started
    BuildStarted,

    /// Synth or checksum failed; nothing was queued
    BuildFailed { code: String, message: String },

    /// Rebuilt artifact matches the deployed one
    BuildUnchanged { fingerprint: Fingerprint },

    /// Rebuilt artifact differs and was queued for deployment
    BuildComplete {
        fingerprint: Fingerprint,
        units: Vec<String>,
        first: bool,
    },

    /// A deployment is in flight; the artifact waits (replacing any older one)
    DeployQueued { fingerprint: Fingerprint },

    /// Deploy executor invoked
    DeployStarted {
        fingerprint: Fingerprint,
        units: Vec<String>,
    },

    /// Outcome for a single unit
    UnitDeployed {
        name: String,
        status: UnitStatus,
        errors: Vec<ResourceError>,
    },

    /// Executor itself failed; baseline untouched
    DeployFailed { message: String },

    /// Executor returned; baseline advanced
    DeployComplete {
        fingerprint: Fingerprint,
        succeeded: usize,
        failed: usize,
    },

    /// Remote function invoked
    FunctionInvoked { function_id: String },

    /// Remote function wrote a log line
    FunctionLog { function_id: String, message: String },

    /// Remote function returned successfully
    FunctionSucceeded { function_id: String },

    /// Loop stopped
    Shutdown,
}

impl DevEvent {
    /// Convert to a JSON line with `"command": "dev"` included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("dev"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Events that only matter at higher verbosity
    pub fn is_detail(&self) -> bool {
        matches!(self, DevEvent::FileIgnored { .. })
    }
}

/// Trait for receiving dev events
///
/// Implementations can be:
/// - ConsoleEventSink: Timestamped lines in the terminal
/// - JsonEventSink: NDJSON event stream for tooling
/// - NoopEventSink: Silent operation
pub trait DevEventSink: Send + Sync {
    fn on_event(&self, event: DevEvent);

    /// Whether this sink wants detail events such as ignored file changes
    fn wants_detailed_events(&self) -> bool {
        false
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DevEventSink for NoopEventSink {
    fn on_event(&self, _event: DevEvent) {}
}
