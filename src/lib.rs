//! stackdev - local development loop for infrastructure-as-code projects
//!
//! stackdev watches a project's sources, re-runs synth when a file that fed
//! the last build changes, fingerprints the rendered templates and deploys
//! only when they actually differ. At most one deployment runs at a time;
//! artifacts built meanwhile collapse into a single follow-up deployment.
//!
//! ## Layers
//!
//! - `domain` - Entities, value objects and ports (no I/O)
//! - `application` - Checksum engine, coordinators, listener, dev loop
//! - `infrastructure` - Event bus, command adapters, watcher, sinks
//! - `presentation` - Dependency wiring for the CLI
//! - `config` - `stackdev.toml` and `STACKDEV_*` overrides

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    fingerprint, fingerprint_directory, AttemptOutcome, BuildCoordinator, BuildOutcome,
    ChangeListener, DeployCoordinator, DevLoop, DevOptions, DevSummary, InvocationLogger,
};
pub use config::Config;
pub use domain::entities::{Artifact, DeployReport, DeployableUnit, UnitResult, UnitStatus};
pub use domain::ports::{
    ArtifactBuilder, DeployExecutor, DevEvent, DevEventSink, NoopEventSink, ProjectDefinition,
    SynthMode,
};
pub use domain::value_objects::{Fingerprint, InputManifest};
pub use error::{StackError, StackResult};
pub use infrastructure::{BusEvent, EventBus, Topic};
