//! Build Coordinator
//!
//! Runs synth, fingerprints the result and decides whether it needs
//! deploying. Builds are expected to be triggered serially (initial build,
//! then one per relevant file change); concurrent calls are not isolated.
//!
//! Every build synthesizes into its own `build-<n>` directory under the
//! output root. A later build, even a failed one, never writes over an
//! artifact that is pending or being deployed; directories the deploy
//! coordinator no longer holds are pruned before the next synth.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::application::checksum;
use crate::application::deploy_coordinator::DeployCoordinator;
use crate::domain::entities::Artifact;
use crate::domain::ports::{ArtifactBuilder, DevEvent, DevEventSink, SynthMode};
use crate::domain::value_objects::{Fingerprint, InputManifest};
use crate::error::{StackError, StackResult};
use crate::infrastructure::bus::{BusEvent, EventBus};

/// Name prefix of per-build output directories
pub const BUILD_DIR_PREFIX: &str = "build-";

/// What a successful build led to
#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    /// Fingerprint matches the deployed baseline; nothing to do
    Unchanged(Fingerprint),
    /// Artifact placed in the pending slot
    Queued {
        fingerprint: Fingerprint,
        /// A deployment was already running; this one waits for it
        waiting: bool,
    },
}

pub struct BuildCoordinator {
    builder: Arc<dyn ArtifactBuilder>,
    deployer: Arc<DeployCoordinator>,
    bus: EventBus,
    sink: Arc<dyn DevEventSink>,
    out_dir: PathBuf,
    mode: SynthMode,
    next_build: AtomicUsize,
    last_inputs: Mutex<Option<InputManifest>>,
}

impl BuildCoordinator {
    pub fn new(
        builder: Arc<dyn ArtifactBuilder>,
        deployer: Arc<DeployCoordinator>,
        bus: EventBus,
        sink: Arc<dyn DevEventSink>,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            builder,
            deployer,
            bus,
            sink,
            out_dir: out_dir.into(),
            mode: SynthMode::Dev,
            next_build: AtomicUsize::new(0),
            last_inputs: Mutex::new(None),
        }
    }

    pub fn with_mode(mut self, mode: SynthMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn deployer(&self) -> &Arc<DeployCoordinator> {
        &self.deployer
    }

    /// Inputs of the latest build whose synth succeeded
    pub fn last_inputs(&self) -> Option<InputManifest> {
        self.last_inputs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Build, compare against the deployed baseline and queue if changed.
    ///
    /// Failures are reported to the sink and returned; no state changes.
    pub fn build(&self) -> StackResult<BuildOutcome> {
        let outcome = self.stage()?;
        if let BuildOutcome::Queued { .. } = outcome {
            // Detached: the worker clears the deploying flag when it drains
            let _ = self.deployer.deploy();
        }
        Ok(outcome)
    }

    /// Like [`build`](Self::build) but leaves the artifact in the pending
    /// slot without starting a deployment.
    pub fn stage(&self) -> StackResult<BuildOutcome> {
        let (artifact, fingerprint) = self.synthesize()?;

        let baseline = self.deployer.last_deployed();
        if baseline.as_ref() == Some(&fingerprint) {
            self.sink
                .on_event(DevEvent::BuildUnchanged { fingerprint: fingerprint.clone() });
            return Ok(BuildOutcome::Unchanged(fingerprint));
        }

        self.sink.on_event(DevEvent::BuildComplete {
            fingerprint: fingerprint.clone(),
            units: artifact.unit_names(),
            first: baseline.is_none(),
        });

        let waiting = self.deployer.submit(artifact, fingerprint.clone());
        Ok(BuildOutcome::Queued {
            fingerprint,
            waiting,
        })
    }

    /// Synth and fingerprint without touching deploy state.
    ///
    /// Publishes `stack.built` with the build's inputs once synth succeeds,
    /// so the change listener tracks the latest input set even if the
    /// checksum step fails afterwards.
    pub fn synthesize(&self) -> StackResult<(Artifact, Fingerprint)> {
        self.sink.on_event(DevEvent::BuildStarted);

        self.prune_build_dirs();
        let build_dir = self.out_dir.join(format!(
            "{}{}",
            BUILD_DIR_PREFIX,
            self.next_build.fetch_add(1, Ordering::SeqCst)
        ));
        let artifact = self
            .builder
            .build_project()
            .and_then(|project| self.builder.synth(&project, &build_dir, self.mode))
            .map_err(|e| self.report_failure(e))?;

        *self
            .last_inputs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(artifact.inputs().clone());
        self.bus.publish(BusEvent::StackBuilt {
            inputs: artifact.inputs().clone(),
        });

        let fingerprint = checksum::fingerprint(&artifact).map_err(|e| self.report_failure(e))?;
        Ok((artifact, fingerprint))
    }

    /// Remove `build-<n>` directories the deploy coordinator does not hold.
    ///
    /// Builds run serially, so the held set can only shrink between the
    /// snapshot and the removal.
    fn prune_build_dirs(&self) {
        let Ok(entries) = fs::read_dir(&self.out_dir) else {
            return;
        };
        let held = self.deployer.artifact_dirs();
        for entry in entries.flatten() {
            let path = entry.path();
            let is_build_dir = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(BUILD_DIR_PREFIX));
            if is_build_dir && path.is_dir() && !held.contains(&path) {
                // Best effort: a leftover directory is never deployed
                let _ = fs::remove_dir_all(&path);
            }
        }
    }

    fn report_failure(&self, error: StackError) -> StackError {
        self.sink.on_event(DevEvent::BuildFailed {
            code: error.code().to_string(),
            message: error.to_string(),
        });
        error
    }
}
