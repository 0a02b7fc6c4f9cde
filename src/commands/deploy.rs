use std::sync::Arc;

use anyhow::{bail, Result};
use stackdev::infrastructure::SessionLock;
use stackdev::presentation::create_dev_components;
use stackdev::{AttemptOutcome, StackError, SynthMode};

use super::Project;

pub fn cmd_deploy(project: &Project) -> Result<()> {
    let _lock = SessionLock::acquire(&project.root)?;

    let sink = project.sink();
    project.report_warnings(sink.as_ref());
    let components = create_dev_components(
        &project.root,
        &project.config,
        Arc::clone(&sink),
        SynthMode::Deploy,
    )?;

    match components.dev_loop.deploy_once()? {
        None => {
            if !project.ui.json {
                print!(
                    "{}",
                    crate::ui::views::build::render_up_to_date(
                        project.ui.color,
                        project.ui.unicode
                    )
                );
            }
            Ok(())
        }
        Some(AttemptOutcome::Completed { failed_units, .. }) if failed_units > 0 => {
            bail!("{} unit(s) failed to deploy", failed_units)
        }
        Some(AttemptOutcome::Completed { .. }) => Ok(()),
        Some(AttemptOutcome::ExecutorFailed { message }) => {
            Err(StackError::DeployExecutor { message }.into())
        }
    }
}
