use anyhow::Result;
use stackdev::domain::ports::NoopEventSink;
use stackdev::presentation::create_dev_components;
use stackdev::SynthMode;
use std::sync::Arc;

use super::Project;
use crate::ui::views::build::{build_summary_json, render_build_summary};

pub fn cmd_build(project: &Project) -> Result<()> {
    let sink = project.sink();
    project.report_warnings(sink.as_ref());

    // Build output is the summary below, not the event stream
    let components = create_dev_components(
        &project.root,
        &project.config,
        Arc::new(NoopEventSink),
        SynthMode::Dev,
    )?;
    let (artifact, fingerprint) = components.dev_loop.build_once()?;

    if project.ui.json {
        crate::ui::json::emit(build_summary_json(&artifact, &fingerprint))?;
    } else {
        print!(
            "{}",
            render_build_summary(&artifact, &fingerprint, project.ui.color, project.ui.unicode)
        );
    }
    Ok(())
}
