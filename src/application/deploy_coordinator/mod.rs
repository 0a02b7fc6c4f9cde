//! Deploy Coordinator
//!
//! Serializes deployments and holds at most one pending artifact.
//!
//! ## State machine
//!
//! ```text
//!            submit + deploy()                 attempt done, slot empty
//!   Idle ───────────────────────▶ Deploying ──────────────────────────▶ Idle
//!                                   │    ▲
//!                                   └────┘ attempt done, slot refilled
//! ```
//!
//! - Every transition happens under one lock, so `pending`, `deploying`
//!   and `last_deployed` always change together.
//! - A newer artifact replaces the pending one; only the latest build is
//!   ever deployed.
//! - When an attempt finishes the slot is re-checked *before* the
//!   deploying flag is cleared, so an artifact built mid-deployment is
//!   never stranded.

use std::path::PathBuf;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::domain::entities::{Artifact, DeployReport, UnitResult, UnitStatus};
use crate::domain::ports::{DeployExecutor, DevEvent, DevEventSink};
use crate::domain::value_objects::Fingerprint;


/// Error recorded for a unit the executor did not report on
pub const MISSING_RESULT: &str = "no result reported by deploy executor";

/// An artifact waiting for (or undergoing) deployment
#[derive(Debug, Clone)]
struct Candidate {
    artifact: Artifact,
    fingerprint: Fingerprint,
}

#[derive(Debug, Default)]
struct LoopState {
    pending: Option<Candidate>,
    deploying: bool,
    /// Directory of the artifact the executor is working on
    in_flight: Option<PathBuf>,
    last_deployed: Option<Fingerprint>,
}

/// Outcome of one deployment attempt
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// Executor returned a report; baseline advanced
    Completed {
        fingerprint: Fingerprint,
        failed_units: usize,
    },
    /// Executor itself failed; baseline unchanged
    ExecutorFailed { message: String },
}

pub struct DeployCoordinator {
    executor: Arc<dyn DeployExecutor>,
    sink: Arc<dyn DevEventSink>,
    state: Mutex<LoopState>,
    idle: Condvar,
}

impl DeployCoordinator {
    pub fn new(executor: Arc<dyn DeployExecutor>, sink: Arc<dyn DevEventSink>) -> Arc<Self> {
        Arc::new(Self {
            executor,
            sink,
            state: Mutex::new(LoopState::default()),
            idle: Condvar::new(),
        })
    }

    fn lock(&self) -> MutexGuard<'_, LoopState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Fingerprint of the last artifact the executor returned for
    pub fn last_deployed(&self) -> Option<Fingerprint> {
        self.lock().last_deployed.clone()
    }

    pub fn is_deploying(&self) -> bool {
        self.lock().deploying
    }

    pub fn pending_fingerprint(&self) -> Option<Fingerprint> {
        self.lock().pending.as_ref().map(|c| c.fingerprint.clone())
    }

    /// Output directories still owned by the coordinator: the pending
    /// artifact's and the one being deployed.
    pub fn artifact_dirs(&self) -> Vec<PathBuf> {
        let state = self.lock();
        state
            .pending
            .iter()
            .map(|c| c.artifact.directory().to_path_buf())
            .chain(state.in_flight.clone())
            .collect()
    }

    /// Put `artifact` in the pending slot, discarding any older one.
    ///
    /// Returns `true` when a deployment is in flight, i.e. the artifact
    /// will wait for the current attempt to finish.
    pub fn submit(&self, artifact: Artifact, fingerprint: Fingerprint) -> bool {
        let deploying = {
            let mut state = self.lock();
            state.pending = Some(Candidate {
                artifact,
                fingerprint: fingerprint.clone(),
            });
            state.deploying
        };

        if deploying {
            self.sink.on_event(DevEvent::DeployQueued { fingerprint });
        }
        deploying
    }

    /// Start draining the pending slot on a worker thread.
    ///
    /// No-op (returns `None`) while a deployment is already running or
    /// when nothing is pending.
    pub fn deploy(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let first = self.claim()?;
        let coordinator = Arc::clone(self);
        let spawned = std::thread::Builder::new()
            .name("stackdev-deploy".to_string())
            .spawn({
                let first = first.clone();
                move || {
                    coordinator.drain(first);
                }
            });

        match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                self.release(first);
                self.sink.on_event(DevEvent::DeployFailed {
                    message: format!("cannot start deploy worker: {}", e),
                });
                None
            }
        }
    }

    /// Drain the pending slot on the calling thread.
    ///
    /// Returns the outcome of every attempt made; empty when another
    /// thread is already deploying or nothing is pending.
    pub fn deploy_blocking(&self) -> Vec<AttemptOutcome> {
        match self.claim() {
            Some(first) => self.drain(first),
            None => Vec::new(),
        }
    }

    /// Block until no deployment is running.
    ///
    /// An artifact left in the pending slot by
    /// [`BuildCoordinator::stage`](crate::application::BuildCoordinator::stage)
    /// does not count; only [`deploy`](Self::deploy) or
    /// [`deploy_blocking`](Self::deploy_blocking) move it on. Returns
    /// `false` if `timeout` elapsed first.
    pub fn wait_idle(&self, timeout: Option<Duration>) -> bool {
        let deadline = timeout.map(|t| Instant::now() + t);
        let mut state = self.lock();
        while state.deploying {
            state = match deadline {
                None => self
                    .idle
                    .wait(state)
                    .unwrap_or_else(|poisoned| poisoned.into_inner()),
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return false;
                    }
                    self.idle
                        .wait_timeout(state, deadline - now)
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .0
                }
            };
        }
        true
    }

    /// Idle → Deploying: take the pending artifact and raise the flag.
    fn claim(&self) -> Option<Candidate> {
        let mut state = self.lock();
        if state.deploying {
            return None;
        }
        let candidate = state.pending.take()?;
        state.deploying = true;
        state.in_flight = Some(candidate.artifact.directory().to_path_buf());
        Some(candidate)
    }

    /// Undo a claim whose worker never started.
    fn release(&self, candidate: Candidate) {
        let mut state = self.lock();
        if state.pending.is_none() {
            state.pending = Some(candidate);
        }
        state.deploying = false;
        state.in_flight = None;
        self.idle.notify_all();
    }

    fn drain(&self, first: Candidate) -> Vec<AttemptOutcome> {
        let mut outcomes = Vec::new();
        let mut next = Some(first);
        while let Some(candidate) = next {
            outcomes.push(self.attempt(candidate));
            next = self.finish_attempt();
        }
        outcomes
    }

    /// Deploying → Deploying if the slot was refilled, otherwise → Idle.
    fn finish_attempt(&self) -> Option<Candidate> {
        let mut state = self.lock();
        match state.pending.take() {
            Some(candidate) => {
                state.in_flight = Some(candidate.artifact.directory().to_path_buf());
                Some(candidate)
            }
            None => {
                state.deploying = false;
                state.in_flight = None;
                self.idle.notify_all();
                None
            }
        }
    }

    fn attempt(&self, candidate: Candidate) -> AttemptOutcome {
        let Candidate {
            artifact,
            fingerprint,
        } = candidate;

        self.sink.on_event(DevEvent::DeployStarted {
            fingerprint: fingerprint.clone(),
            units: artifact.unit_names(),
        });

        let report = match self
            .executor
            .deploy_many(artifact.directory(), artifact.units())
        {
            Ok(report) => report,
            Err(e) => {
                let message = e.to_string();
                self.sink.on_event(DevEvent::DeployFailed {
                    message: message.clone(),
                });
                return AttemptOutcome::ExecutorFailed { message };
            }
        };

        let failed_units = self.report_units(&artifact, &report);

        self.lock().last_deployed = Some(fingerprint.clone());

        self.sink.on_event(DevEvent::DeployComplete {
            fingerprint: fingerprint.clone(),
            succeeded: artifact.units().len() - failed_units,
            failed: failed_units,
        });

        AttemptOutcome::Completed {
            fingerprint,
            failed_units,
        }
    }

    /// Emit one event per unit, in artifact order. Returns the failure count.
    fn report_units(&self, artifact: &Artifact, report: &DeployReport) -> usize {
        let mut failed = 0;
        for unit in artifact.units() {
            let result = report.get(&unit.name).cloned().unwrap_or_else(|| {
                UnitResult::failed([(unit.name.clone(), MISSING_RESULT.to_string())])
            });
            if result.status == UnitStatus::Failed {
                failed += 1;
            }
            self.sink.on_event(DevEvent::UnitDeployed {
                name: unit.name.clone(),
                status: result.status,
                errors: result.resource_errors(),
            });
        }
        failed
    }
}
