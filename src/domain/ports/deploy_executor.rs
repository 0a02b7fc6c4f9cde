//! Deploy Executor Port
//!
//! Applies deployable units to the remote target. Per-unit failures are
//! reported in the returned [`DeployReport`]; an `Err` means the executor
//! itself could not be driven (spawn failure, broken protocol, IO).

use std::path::Path;

use crate::domain::entities::{DeployReport, DeployableUnit};
use crate::error::StackResult;

pub trait DeployExecutor: Send + Sync {
    /// Deploy every unit, in order, from the artifact directory
    fn deploy_many(&self, directory: &Path, units: &[DeployableUnit]) -> StackResult<DeployReport>;
}
