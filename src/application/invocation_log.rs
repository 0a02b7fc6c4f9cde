//! Invocation Event Logger
//!
//! Independent subscriber for remote function lifecycle events. Runs on its
//! own thread and shares nothing with the build/deploy path except the bus.

use std::sync::Arc;
use std::thread::JoinHandle;

use crate::domain::ports::{DevEvent, DevEventSink};
use crate::error::{StackError, StackResult};
use crate::infrastructure::bus::{BusEvent, EventBus, SubscriptionHandle, Topic};

/// Topics the logger listens on
pub const INVOCATION_TOPICS: [Topic; 3] = [
    Topic::FunctionInvoked,
    Topic::WorkerStdout,
    Topic::FunctionSuccess,
];

/// Map a runtime bus event to the line reported to the operator.
pub fn to_dev_event(event: BusEvent) -> Option<DevEvent> {
    match event {
        BusEvent::FunctionInvoked { function_id } => Some(DevEvent::FunctionInvoked { function_id }),
        BusEvent::WorkerStdout {
            function_id,
            message,
        } => Some(DevEvent::FunctionLog {
            function_id,
            message,
        }),
        BusEvent::FunctionSuccess { function_id } => {
            Some(DevEvent::FunctionSucceeded { function_id })
        }
        _ => None,
    }
}

pub struct InvocationLogger {
    handle: SubscriptionHandle,
    worker: Option<JoinHandle<()>>,
}

impl InvocationLogger {
    /// Subscribe and start forwarding events to `sink`.
    pub fn start(bus: &EventBus, sink: Arc<dyn DevEventSink>) -> StackResult<Self> {
        let subscription = bus.subscribe(&INVOCATION_TOPICS);
        let handle = subscription.handle();

        let worker = std::thread::Builder::new()
            .name("stackdev-invocations".to_string())
            .spawn(move || {
                while let Some(event) = subscription.recv() {
                    if let Some(line) = to_dev_event(event) {
                        sink.on_event(line);
                    }
                }
            })
            .map_err(|e| StackError::Watch {
                message: format!("cannot start invocation logger: {}", e),
            })?;

        Ok(Self {
            handle,
            worker: Some(worker),
        })
    }

    /// Unsubscribe, flush what was already delivered and join the thread.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.handle.cancel();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for InvocationLogger {
    fn drop(&mut self) {
        self.shutdown();
    }
}
