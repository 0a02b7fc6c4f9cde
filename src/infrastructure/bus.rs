//! Event Bus
//!
//! Typed publish/subscribe between the watcher, the control loop and the
//! runtime relay. Each subscriber owns an `mpsc` receiver; publishing
//! clones the event into every channel subscribed to its topic, so a slow
//! subscriber never blocks the publisher.
//!
//! Dropping a [`Subscription`] (or calling [`SubscriptionHandle::cancel`])
//! removes it from the bus and disconnects its receiver.

use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use crate::domain::value_objects::InputManifest;

/// Named topics carried by the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    FileChanged,
    StackBuilt,
    FunctionInvoked,
    WorkerStdout,
    FunctionSuccess,
}

impl Topic {
    /// Wire name of the topic
    pub fn name(&self) -> &'static str {
        match self {
            Topic::FileChanged => "file.changed",
            Topic::StackBuilt => "stack.built",
            Topic::FunctionInvoked => "function.invoked",
            Topic::WorkerStdout => "worker.stdout",
            Topic::FunctionSuccess => "function.success",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "file.changed" => Some(Topic::FileChanged),
            "stack.built" => Some(Topic::StackBuilt),
            "function.invoked" => Some(Topic::FunctionInvoked),
            "worker.stdout" => Some(Topic::WorkerStdout),
            "function.success" => Some(Topic::FunctionSuccess),
            _ => None,
        }
    }
}

/// Payload published on the bus; the variant determines the topic.
#[derive(Debug, Clone, PartialEq)]
pub enum BusEvent {
    FileChanged { path: String },
    StackBuilt { inputs: InputManifest },
    FunctionInvoked { function_id: String },
    WorkerStdout { function_id: String, message: String },
    FunctionSuccess { function_id: String },
}

impl BusEvent {
    pub fn topic(&self) -> Topic {
        match self {
            BusEvent::FileChanged { .. } => Topic::FileChanged,
            BusEvent::StackBuilt { .. } => Topic::StackBuilt,
            BusEvent::FunctionInvoked { .. } => Topic::FunctionInvoked,
            BusEvent::WorkerStdout { .. } => Topic::WorkerStdout,
            BusEvent::FunctionSuccess { .. } => Topic::FunctionSuccess,
        }
    }
}

struct Subscriber {
    id: u64,
    topics: Vec<Topic>,
    tx: Sender<BusEvent>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Cloneable handle to a shared bus
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Arc<Mutex<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every subscriber of its topic.
    ///
    /// Returns the number of subscribers reached. Subscribers whose
    /// receiver is gone are pruned.
    pub fn publish(&self, event: BusEvent) -> usize {
        let topic = event.topic();
        let mut registry = lock(&self.registry);
        let mut delivered = 0;
        registry.subscribers.retain(|sub| {
            if !sub.topics.contains(&topic) {
                return true;
            }
            match sub.tx.send(event.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(_) => false,
            }
        });
        delivered
    }

    /// Subscribe to one or more topics through a single ordered channel.
    pub fn subscribe(&self, topics: &[Topic]) -> Subscription {
        let (tx, rx) = channel();
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.subscribers.push(Subscriber {
            id,
            topics: topics.to_vec(),
            tx,
        });

        Subscription {
            rx,
            handle: SubscriptionHandle {
                id,
                registry: Arc::downgrade(&self.registry),
            },
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.registry).subscribers.len()
    }
}

/// Cancels a subscription from any thread
#[derive(Clone)]
pub struct SubscriptionHandle {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl SubscriptionHandle {
    /// Remove the subscription; its receiver disconnects once drained.
    pub fn cancel(&self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).subscribers.retain(|sub| sub.id != self.id);
        }
    }
}

/// Receiving end of a bus subscription
pub struct Subscription {
    rx: Receiver<BusEvent>,
    handle: SubscriptionHandle,
}

impl Subscription {
    pub fn handle(&self) -> SubscriptionHandle {
        self.handle.clone()
    }

    /// Block until an event arrives; `None` once cancelled and drained.
    pub fn recv(&self) -> Option<BusEvent> {
        self.rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<BusEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn try_recv(&self) -> Option<BusEvent> {
        self.rx.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.cancel();
    }
}
