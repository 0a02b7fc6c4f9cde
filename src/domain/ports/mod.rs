//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod artifact_builder;
pub mod deploy_executor;
pub mod dev_events;

pub use artifact_builder::{ArtifactBuilder, ProjectDefinition, SynthMode};
pub use deploy_executor::DeployExecutor;
pub use dev_events::{DevEvent, DevEventSink, NoopEventSink};
