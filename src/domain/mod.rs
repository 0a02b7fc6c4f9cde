//! Domain Layer
//!
//! The control loop's vocabulary - artifacts, fingerprints, input
//! manifests, deploy reports - without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Artifact, DeployableUnit, DeployReport
//! - `value_objects/` - Fingerprint, InputManifest, IgnorePatterns
//! - `services/` - Assembly manifest parsing
//! - `ports/` - Interfaces for the builder, the deploy executor and event sinks

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
