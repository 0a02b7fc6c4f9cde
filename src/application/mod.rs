//! Application Layer
//!
//! Use cases that orchestrate the dev control loop.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Components
//!
//! - `checksum` - Fingerprints an artifact's deployable templates
//! - `ChangeListener` - Filters file changes against the last build's inputs
//! - `BuildCoordinator` - Synth, fingerprint, compare, queue
//! - `DeployCoordinator` - Serialized deployments with a single pending slot
//! - `InvocationLogger` - Reports remote function lifecycle events
//! - `DevLoop` - Wires all of the above for `stackdev start`

pub mod build_coordinator;
pub mod change_listener;
pub mod checksum;
pub mod deploy_coordinator;
pub mod dev;
pub mod invocation_log;

#[cfg(test)]
mod test_support;

pub use build_coordinator::{BuildCoordinator, BuildOutcome};
pub use change_listener::ChangeListener;
pub use checksum::{fingerprint, fingerprint_directory};
pub use deploy_coordinator::{AttemptOutcome, DeployCoordinator};
pub use dev::{DevLoop, DevOptions, DevSummary};
pub use invocation_log::InvocationLogger;
