use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use stackdev::infrastructure::{FileWatcher, RuntimeEventRelay, SessionLock};
use stackdev::presentation::create_dev_components;
use stackdev::{DevEvent, SynthMode};

use super::Project;

pub fn cmd_start(project: &Project, runtime_events: Option<&Path>) -> Result<()> {
    let _lock = SessionLock::acquire(&project.root)?;

    let sink = project.sink();
    let components = create_dev_components(
        &project.root,
        &project.config,
        Arc::clone(&sink),
        SynthMode::Dev,
    )?;

    if !project.ui.json {
        print!(
            "{}",
            crate::ui::views::dev::render_start_header(
                &project.root.display().to_string(),
                &components.watch.out_dir.display().to_string(),
                project.ui.color,
                project.ui.unicode,
            )
        );
    }
    project.report_warnings(sink.as_ref());

    let watcher = FileWatcher::start(components.watch.clone(), components.bus.clone())?;

    let reader: Option<Box<dyn Read + Send>> = match runtime_events {
        None => None,
        Some(source) if source == Path::new("-") => Some(Box::new(std::io::stdin())),
        Some(source) => Some(Box::new(File::open(source).with_context(|| {
            format!("cannot open runtime events {}", source.display())
        })?)),
    };
    let relay = RuntimeEventRelay::new(components.bus.clone(), Arc::clone(&sink));

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))
            .context("cannot install Ctrl+C handler")?;
    }

    let result = components.dev_loop.run_with(&running, || {
        if let Some(reader) = reader {
            // Detached: the relay ends at EOF or with the process
            if let Err(e) = relay.spawn(reader) {
                sink.on_event(DevEvent::Warning {
                    message: format!("runtime events not relayed: {}", e),
                });
            }
        }
    });
    watcher.stop();
    result?;
    Ok(())
}
