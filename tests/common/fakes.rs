//! Port fakes for driving the control loop without synth or a cloud

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

use stackdev::{
    Artifact, ArtifactBuilder, DeployExecutor, DeployReport, DeployableUnit, DevEvent,
    DevEventSink, InputManifest, ProjectDefinition, StackError, StackResult, SynthMode,
    UnitResult,
};

use super::fixtures::write_assembly;

/// Sink that records every event
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<DevEvent>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<DevEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl DevEventSink for RecordingSink {
    fn on_event(&self, event: DevEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Builder rendering one scripted set of stacks per build
pub struct FakeBuilder {
    root: PathBuf,
    inputs: InputManifest,
    script: Mutex<VecDeque<Vec<(String, String)>>>,
    builds: AtomicUsize,
}

impl FakeBuilder {
    pub fn new(root: &Path, inputs: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            root: root.to_path_buf(),
            inputs: inputs.iter().map(|p| (*p, true)).collect(),
            script: Mutex::new(VecDeque::new()),
            builds: AtomicUsize::new(0),
        })
    }

    pub fn then_render(&self, stacks: &[(&str, &str)]) -> &Self {
        self.script.lock().unwrap().push_back(
            stacks
                .iter()
                .map(|(n, t)| (n.to_string(), t.to_string()))
                .collect(),
        );
        self
    }

    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

impl ArtifactBuilder for FakeBuilder {
    fn build_project(&self) -> StackResult<ProjectDefinition> {
        Ok(ProjectDefinition {
            name: "notes-api".into(),
            root: self.root.clone(),
        })
    }

    fn synth(
        &self,
        _project: &ProjectDefinition,
        out_dir: &Path,
        _mode: SynthMode,
    ) -> StackResult<Artifact> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        let stacks = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| StackError::Build {
                message: "nothing scripted".into(),
            })?;

        let dir = out_dir.to_path_buf();
        let borrowed: Vec<(&str, &str)> = stacks
            .iter()
            .map(|(n, t)| (n.as_str(), t.as_str()))
            .collect();
        write_assembly(&dir, &borrowed);

        let units = stacks
            .iter()
            .map(|(name, _)| DeployableUnit::new(name.clone(), format!("{}.template.json", name)))
            .collect();
        Ok(Artifact::new(dir, units, self.inputs.clone()))
    }
}

/// Executor that blocks in `deploy_many` until the test releases it
pub struct GatedExecutor {
    calls: Mutex<Vec<PathBuf>>,
    reports: Mutex<VecDeque<DeployReport>>,
    entered: Mutex<Sender<PathBuf>>,
    release: Mutex<Receiver<()>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

/// Test side of a [`GatedExecutor`]
pub struct Gate {
    pub entered: Receiver<PathBuf>,
    pub release: Sender<()>,
}

impl GatedExecutor {
    pub fn new() -> (Arc<Self>, Gate) {
        let (entered_tx, entered_rx) = channel();
        let (release_tx, release_rx) = channel();
        (
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                reports: Mutex::new(VecDeque::new()),
                entered: Mutex::new(entered_tx),
                release: Mutex::new(release_rx),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }),
            Gate {
                entered: entered_rx,
                release: release_tx,
            },
        )
    }

    /// Report returned by the next call instead of all-success
    pub fn respond(&self, report: DeployReport) {
        self.reports.lock().unwrap().push_back(report);
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl DeployExecutor for GatedExecutor {
    fn deploy_many(&self, directory: &Path, units: &[DeployableUnit]) -> StackResult<DeployReport> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.lock().unwrap().push(directory.to_path_buf());

        let _ = self.entered.lock().unwrap().send(directory.to_path_buf());
        // A dropped sender releases every later call too
        let _ = self.release.lock().unwrap().recv();

        let scripted = self.reports.lock().unwrap().pop_front();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        Ok(scripted.unwrap_or_else(|| {
            units.iter().fold(DeployReport::new(), |report, unit| {
                report.with(unit.name.clone(), UnitResult::success())
            })
        }))
    }
}
