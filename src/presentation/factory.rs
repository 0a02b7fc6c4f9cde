//! Use Case Factory
//!
//! Creates the dev loop with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::{DevLoop, DevOptions};
use crate::config::Config;
use crate::domain::ports::{DevEventSink, SynthMode};
use crate::domain::value_objects::IgnorePatterns;
use crate::error::{StackError, StackResult};
use crate::infrastructure::{CommandDeployExecutor, CommandSynthesizer, EventBus, WatchSettings};

/// Everything a command needs to drive one project
pub struct DevComponents {
    pub dev_loop: DevLoop,
    pub bus: EventBus,
    pub watch: WatchSettings,
}

/// Resolve `project` to an existing directory.
pub fn resolve_root(project: Option<&Path>) -> StackResult<PathBuf> {
    let root = match project {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };
    if !root.is_dir() {
        return Err(StackError::ProjectNotFound { path: root });
    }
    Ok(root.canonicalize()?)
}

/// Create the dev loop, its bus and watch settings for `root`.
///
/// Uses the command-driven synthesizer and deploy executor from `config`.
pub fn create_dev_components(
    root: &Path,
    config: &Config,
    sink: Arc<dyn DevEventSink>,
    mode: SynthMode,
) -> StackResult<DevComponents> {
    let ignore = IgnorePatterns::load(root, &config.watch.ignore)?;
    let out_dir = config.out_dir(root);

    let builder = CommandSynthesizer::new(
        config.project_name(root),
        root,
        config.build.command.clone(),
        config.build.inputs_file.clone(),
        ignore.clone(),
    )
    .excluding(&out_dir);
    let executor = CommandDeployExecutor::new(root, config.deploy.command.clone());
    let bus = EventBus::new();

    let dev_loop = DevLoop::new(
        DevOptions::new(root, &out_dir).with_mode(mode),
        Arc::new(builder),
        Arc::new(executor),
        bus.clone(),
        sink,
    );

    Ok(DevComponents {
        dev_loop,
        bus,
        watch: WatchSettings {
            root: root.to_path_buf(),
            out_dir,
            ignore,
            cooldown: config.cooldown(),
        },
    })
}
