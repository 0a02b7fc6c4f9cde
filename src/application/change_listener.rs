//! Change Listener
//!
//! Filters `file.changed` events against the input manifest of the latest
//! build. There is deliberately no debounce here: every relevant change
//! triggers a build, and bursts collapse downstream (unchanged fingerprints
//! are skipped, newer artifacts replace the pending one).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::{DevEvent, DevEventSink};
use crate::domain::value_objects::InputManifest;
use crate::infrastructure::bus::{BusEvent, EventBus, Subscription, Topic};

/// How often the listener re-checks the running flag while idle
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct ChangeListener {
    subscription: Subscription,
    manifest: Option<InputManifest>,
    sink: Arc<dyn DevEventSink>,
    retry_before_first_build: bool,
}

impl ChangeListener {
    /// Subscribe to file changes and build announcements on `bus`.
    pub fn new(bus: &EventBus, sink: Arc<dyn DevEventSink>) -> Self {
        Self {
            subscription: bus.subscribe(&[Topic::FileChanged, Topic::StackBuilt]),
            manifest: None,
            sink,
            retry_before_first_build: false,
        }
    }

    /// Until a manifest exists, treat every change as relevant.
    ///
    /// Without this a failed initial build leaves nothing to filter
    /// against and the loop could never rebuild.
    pub fn retry_before_first_build(mut self) -> Self {
        self.retry_before_first_build = true;
        self
    }

    /// Adopt `inputs` without waiting for their `stack.built` event.
    ///
    /// Changes already queued behind a build are then filtered against
    /// that build's inputs instead of whatever came before.
    pub fn set_manifest(&mut self, inputs: InputManifest) {
        self.manifest = Some(inputs);
    }

    /// Inputs of the latest build, once one has been announced
    pub fn manifest(&self) -> Option<&InputManifest> {
        self.manifest.as_ref()
    }

    /// Process one event. Returns `true` when a build should run.
    pub fn handle(&mut self, event: BusEvent) -> bool {
        match event {
            BusEvent::StackBuilt { inputs } => {
                self.manifest = Some(inputs);
                false
            }
            BusEvent::FileChanged { path } => {
                let relevant = match &self.manifest {
                    Some(manifest) => manifest.is_input(&path),
                    None => self.retry_before_first_build,
                };
                if relevant {
                    self.sink.on_event(DevEvent::FileChanged { path });
                } else if self.sink.wants_detailed_events() {
                    self.sink.on_event(DevEvent::FileIgnored { path });
                }
                relevant
            }
            _ => false,
        }
    }

    /// Dispatch events until `running` is cleared or the bus goes away,
    /// calling `trigger` for each relevant change.
    pub fn run_until(&mut self, running: &AtomicBool, mut trigger: impl FnMut()) {
        while running.load(Ordering::SeqCst) {
            match self.subscription.recv_timeout(POLL_INTERVAL) {
                Ok(event) => {
                    if self.handle(event) {
                        trigger();
                    }
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }
}
