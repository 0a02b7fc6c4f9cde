//! Dev Loop Use Case
//!
//! Wires the change listener, build coordinator, deploy coordinator and
//! invocation logger into the long-lived `stackdev start` loop, plus the
//! one-shot `build` and `deploy` flows.
//!
//! ```text
//! file.changed ─▶ ChangeListener ─▶ BuildCoordinator ─▶ DeployCoordinator ─▶ executor
//!                      ▲                   │
//!                      └──── stack.built ──┘
//! function.* ─▶ InvocationLogger ─▶ sink
//! ```
//!
//! The loop itself does not watch the filesystem; something else (the
//! `FileWatcher` adapter, or a test) publishes `file.changed` on the bus.

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::application::build_coordinator::{BuildCoordinator, BuildOutcome};
use crate::application::change_listener::ChangeListener;
use crate::application::deploy_coordinator::{AttemptOutcome, DeployCoordinator};
use crate::application::invocation_log::InvocationLogger;
use crate::domain::entities::Artifact;
use crate::domain::ports::{ArtifactBuilder, DeployExecutor, DevEvent, DevEventSink, SynthMode};
use crate::domain::value_objects::Fingerprint;
use crate::error::StackResult;
use crate::infrastructure::bus::EventBus;


/// Dev loop options
#[derive(Debug, Clone)]
pub struct DevOptions {
    /// Project root
    pub root: PathBuf,
    /// Root of the per-build synth output directories
    pub out_dir: PathBuf,
    /// Synth mode passed to the builder
    pub mode: SynthMode,
}

impl DevOptions {
    pub fn new(root: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            out_dir: out_dir.into(),
            mode: SynthMode::Dev,
        }
    }

    pub fn with_mode(mut self, mode: SynthMode) -> Self {
        self.mode = mode;
        self
    }
}

/// What a loop run did, returned on shutdown
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DevSummary {
    /// Builds attempted, including the initial one
    pub builds: usize,
    /// Builds that failed
    pub failed_builds: usize,
    /// Baseline at shutdown
    pub last_deployed: Option<Fingerprint>,
}

/// Dev Loop Use Case
///
/// Owns one deploy coordinator per instance, so the deployed baseline
/// lives exactly as long as the loop.
pub struct DevLoop {
    options: DevOptions,
    bus: EventBus,
    sink: Arc<dyn DevEventSink>,
    builds: BuildCoordinator,
}

impl DevLoop {
    pub fn new(
        options: DevOptions,
        builder: Arc<dyn ArtifactBuilder>,
        executor: Arc<dyn DeployExecutor>,
        bus: EventBus,
        sink: Arc<dyn DevEventSink>,
    ) -> Self {
        let deployer = DeployCoordinator::new(executor, sink.clone());
        let builds = BuildCoordinator::new(
            builder,
            deployer,
            bus.clone(),
            sink.clone(),
            options.out_dir.clone(),
        )
        .with_mode(options.mode);

        Self {
            options,
            bus,
            sink,
            builds,
        }
    }

    pub fn options(&self) -> &DevOptions {
        &self.options
    }

    pub fn deployer(&self) -> &Arc<DeployCoordinator> {
        self.builds.deployer()
    }

    /// Run until `running` is cleared (blocking).
    ///
    /// Build and deploy failures are reported through the sink and never
    /// end the loop. On shutdown the in-flight deployment (and whatever it
    /// drains) is awaited before `Shutdown` is emitted.
    pub fn run(&self, running: &AtomicBool) -> StackResult<DevSummary> {
        self.run_with(running, || {})
    }

    /// Like [`run`](Self::run), calling `on_ready` once every bus
    /// subscription is in place and before the initial build.
    ///
    /// Event sources that must not lose early events (a runtime event
    /// relay reading a file) are started from `on_ready`.
    pub fn run_with(
        &self,
        running: &AtomicBool,
        on_ready: impl FnOnce(),
    ) -> StackResult<DevSummary> {
        self.sink.on_event(DevEvent::Started {
            root: self.options.root.clone(),
            out_dir: self.options.out_dir.clone(),
        });

        let logger = InvocationLogger::start(&self.bus, self.sink.clone())?;
        // Subscribe before the initial build so no change during it is lost
        let mut listener = ChangeListener::new(&self.bus, self.sink.clone());
        on_ready();

        let mut summary = DevSummary::default();
        self.record(&mut summary);
        // Changes queued during the initial synth are judged by its inputs.
        // Without any inputs every change retries the build.
        match self.builds.last_inputs() {
            Some(inputs) => listener.set_manifest(inputs),
            None => listener = listener.retry_before_first_build(),
        }
        listener.run_until(running, || self.record(&mut summary));

        logger.stop();
        self.deployer().wait_idle(None);
        summary.last_deployed = self.deployer().last_deployed();

        self.sink.on_event(DevEvent::Shutdown);
        Ok(summary)
    }

    fn record(&self, summary: &mut DevSummary) {
        summary.builds += 1;
        if self.builds.build().is_err() {
            summary.failed_builds += 1;
        }
    }

    /// One build without deploying.
    pub fn build_once(&self) -> StackResult<(Artifact, Fingerprint)> {
        self.builds.synthesize()
    }

    /// One build followed by a synchronous deployment of its result.
    ///
    /// Returns `None` when the build matched the deployed baseline.
    pub fn deploy_once(&self) -> StackResult<Option<AttemptOutcome>> {
        match self.builds.stage()? {
            BuildOutcome::Unchanged(_) => Ok(None),
            BuildOutcome::Queued { .. } => Ok(self.deployer().deploy_blocking().pop()),
        }
    }
}
