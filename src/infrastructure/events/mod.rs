//! Event Sink Implementations
//!
//! Library-side implementations of DevEventSink:
//! - JsonEventSink: NDJSON output for tooling
//!
//! The human-readable console sink lives with the CLI views.

mod json;

pub use json::JsonEventSink;
