//! Fakes shared by application-layer unit tests

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::domain::entities::{Artifact, DeployReport, DeployableUnit, UnitResult};
use crate::domain::ports::{
    ArtifactBuilder, DeployExecutor, DevEvent, DevEventSink, ProjectDefinition, SynthMode,
};
use crate::domain::value_objects::{Fingerprint, InputManifest};
use crate::error::{StackError, StackResult};

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

    pub fn count(&self, pred: impl Fn(&DevEvent) -> bool) -> usize {
        self.events().iter().filter(|e| pred(e)).count()
    }
}

impl DevEventSink for RecordingSink {
    fn on_event(&self, event: DevEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Test side of a gated executor
pub struct Gate {
    /// Receives the artifact directory each time the executor is entered
    pub entered: Receiver<PathBuf>,
    /// Send (or drop) to let blocked deployments return
    pub release: Sender<()>,
}

/// Deploy executor that records calls and returns scripted results
#[derive(Default)]
pub struct FakeExecutor {
    calls: Mutex<Vec<PathBuf>>,
    responses: Mutex<VecDeque<Result<DeployReport, String>>>,
    entered: Option<Mutex<Sender<PathBuf>>>,
    release: Option<Mutex<Receiver<()>>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeExecutor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Executor that blocks inside `deploy_many` until released
    pub fn gated() -> (Arc<Self>, Gate) {
        let (entered_tx, entered_rx) = channel();
        let (release_tx, release_rx) = channel();
        let executor = Self {
            entered: Some(Mutex::new(entered_tx)),
            release: Some(Mutex::new(release_rx)),
            ..Self::default()
        };
        (
            Arc::new(executor),
            Gate {
                entered: entered_rx,
                release: release_tx,
            },
        )
    }

    /// Queue the result of the next call; `Err` simulates an executor failure
    pub fn respond(&self, response: Result<DeployReport, String>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Directories deployed so far, in call order
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl DeployExecutor for FakeExecutor {
    fn deploy_many(&self, directory: &Path, units: &[DeployableUnit]) -> StackResult<DeployReport> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.lock().unwrap().push(directory.to_path_buf());

        if let Some(entered) = &self.entered {
            let _ = entered.lock().unwrap().send(directory.to_path_buf());
        }
        if let Some(release) = &self.release {
            // Err means the test dropped the sender: run freely from now on
            let _ = release.lock().unwrap().recv();
        }

        let response = self.responses.lock().unwrap().pop_front();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match response {
            Some(Ok(report)) => Ok(report),
            Some(Err(message)) => Err(StackError::DeployExecutor { message }),
            None => Ok(units.iter().fold(DeployReport::new(), |report, unit| {
                report.with(unit.name.clone(), UnitResult::success())
            })),
        }
    }
}

/// Builder that writes scripted templates into the directory it is given.
///
/// Each `synth` call pops the next script entry.
pub struct ScriptedBuilder {
    root: PathBuf,
    script: Mutex<VecDeque<Result<Vec<(String, String)>, String>>>,
    inputs: InputManifest,
    builds: AtomicUsize,
    during_next_synth: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl ScriptedBuilder {
    pub fn new(root: &Path, inputs: InputManifest) -> Arc<Self> {
        Arc::new(Self {
            root: root.to_path_buf(),
            script: Mutex::new(VecDeque::new()),
            inputs,
            builds: AtomicUsize::new(0),
            during_next_synth: Mutex::new(None),
        })
    }

    /// Next build renders these `(stack, template)` pairs
    pub fn then_render(&self, stacks: &[(&str, &str)]) {
        self.script.lock().unwrap().push_back(Ok(stacks
            .iter()
            .map(|(n, t)| (n.to_string(), t.to_string()))
            .collect()));
    }

    /// Run `hook` inside the next `synth` call, before it renders
    pub fn during_next_synth(&self, hook: impl FnOnce() + Send + 'static) {
        *self.during_next_synth.lock().unwrap() = Some(Box::new(hook));
    }

    /// Next build fails
    pub fn then_fail(&self, message: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

impl ArtifactBuilder for ScriptedBuilder {
    fn build_project(&self) -> StackResult<ProjectDefinition> {
        Ok(ProjectDefinition {
            name: "test-app".into(),
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
        if let Some(hook) = self.during_next_synth.lock().unwrap().take() {
            hook();
        }
        let stacks = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted build left".into()))
            .map_err(|message| StackError::Build { message })?;

        let dir = out_dir.to_path_buf();
        fs::create_dir_all(&dir)?;
        let units = stacks
            .iter()
            .map(|(name, body)| {
                let file = format!("{}.template.json", name);
                fs::write(dir.join(&file), body)?;
                Ok(DeployableUnit::new(name.clone(), file))
            })
            .collect::<StackResult<Vec<_>>>()?;

        Ok(Artifact::new(dir, units, self.inputs.clone()))
    }
}

/// In-memory artifact for coordinator tests (no files needed)
pub fn artifact(dir: &str, units: &[&str]) -> Artifact {
    Artifact::new(
        dir,
        units
            .iter()
            .map(|u| DeployableUnit::new(*u, format!("{}.template.json", u)))
            .collect(),
        InputManifest::new(),
    )
}

pub fn fp(label: &str) -> Fingerprint {
    Fingerprint::of_templates(&[label])
}
