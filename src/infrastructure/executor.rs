//! Command-driven deploy executor
//!
//! Hands the artifact to the project's deploy command over stdin and reads
//! the per-unit report back from stdout.
//!
//! Request:
//!
//! ```json
//! {"directory": "/abs/out", "units": [{"name": "Api", "templateFile": "Api.template.json"}]}
//! ```
//!
//! Report:
//!
//! ```json
//! {"Api": {"status": "success"}, "Db": {"status": "failed", "errors": {"Table": "Rollback"}}}
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::entities::{DeployReport, DeployableUnit, UnitResult};
use crate::domain::ports::DeployExecutor;
use crate::error::{StackError, StackResult};
use crate::infrastructure::process::run_command;

/// Error attached to units the command did not report on
pub const NOT_REPORTED: &str = "no result reported";

#[derive(Serialize)]
struct DeployRequest<'a> {
    directory: &'a Path,
    units: &'a [DeployableUnit],
}

pub struct CommandDeployExecutor {
    root: PathBuf,
    command: Vec<String>,
}

impl CommandDeployExecutor {
    pub fn new(root: impl Into<PathBuf>, command: Vec<String>) -> Self {
        Self {
            root: root.into(),
            command,
        }
    }
}

impl DeployExecutor for CommandDeployExecutor {
    fn deploy_many(&self, directory: &Path, units: &[DeployableUnit]) -> StackResult<DeployReport> {
        if self.command.is_empty() {
            return Err(StackError::DeployExecutor {
                message: "no deploy command configured ([deploy] command)".to_string(),
            });
        }

        let request = serde_json::to_vec(&DeployRequest { directory, units })?;
        let output = run_command(&self.command, &self.root, &[], Some(&request))
            .map_err(|message| StackError::DeployExecutor { message })?;

        let mut report: DeployReport =
            serde_json::from_slice(&output.stdout).map_err(|e| StackError::DeployExecutor {
                message: format!("malformed deploy report: {}", e),
            })?;

        for unit in units {
            if report.get(&unit.name).is_none() {
                report.insert(
                    unit.name.clone(),
                    UnitResult::failed([(unit.name.clone(), NOT_REPORTED.to_string())]),
                );
            }
        }
        Ok(report)
    }
}
