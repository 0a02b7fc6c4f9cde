//! Domain Entities
//!
//! Core business objects with identity and lifecycle.

mod artifact;
mod deploy_report;

pub use artifact::{Artifact, DeployableUnit};
pub use deploy_report::{DeployReport, ResourceError, UnitResult, UnitStatus};
