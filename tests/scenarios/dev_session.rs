//! A developer session: deploy, an irrelevant edit, then an edit that
//! renders the same templates.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use stackdev::{BusEvent, DevEvent, DevEventSink, DevLoop, DevOptions, EventBus};

use crate::common::{FakeBuilder, GatedExecutor};

const WAIT: Duration = Duration::from_secs(5);

struct ChannelSink(Mutex<Sender<DevEvent>>);

impl DevEventSink for ChannelSink {
    fn on_event(&self, event: DevEvent) {
        let _ = self.0.lock().unwrap().send(event);
    }
}

fn wait_for(events: &Receiver<DevEvent>, pred: impl Fn(&DevEvent) -> bool) -> Vec<DevEvent> {
    let mut seen = Vec::new();
    loop {
        let event = events
            .recv_timeout(WAIT)
            .unwrap_or_else(|_| panic!("timed out; saw {:?}", seen));
        let done = pred(&event);
        seen.push(event);
        if done {
            return seen;
        }
    }
}

#[test]
fn irrelevant_changes_never_build_and_identical_output_never_deploys() {
    let dir = tempfile::tempdir().unwrap();
    let builder = FakeBuilder::new(dir.path(), &["lib/api.ts", "bin/app.ts"]);
    builder
        .then_render(&[("Api", "{\"v\":1}")])
        .then_render(&[("Api", "{\"v\":1}")]);
    let (executor, gate) = GatedExecutor::new();
    drop(gate.release);

    let bus = EventBus::new();
    let (tx, events) = channel();
    let dev = DevLoop::new(
        DevOptions::new(dir.path(), dir.path().join("out")),
        builder.clone(),
        executor.clone(),
        bus.clone(),
        Arc::new(ChannelSink(Mutex::new(tx))),
    );
    let running = Arc::new(AtomicBool::new(true));
    let worker = {
        let running = Arc::clone(&running);
        std::thread::spawn(move || dev.run(&running))
    };

    wait_for(&events, |e| matches!(e, DevEvent::DeployComplete { .. }));
    assert_eq!(executor.calls().len(), 1);

    // Not an input of the last build
    bus.publish(BusEvent::FileChanged {
        path: "README.md".into(),
    });
    bus.publish(BusEvent::FileChanged {
        path: "lib/api.ts".into(),
    });
    let seen = wait_for(&events, |e| matches!(e, DevEvent::BuildUnchanged { .. }));

    running.store(false, Ordering::SeqCst);
    let summary = worker.join().unwrap().unwrap();

    assert!(!seen
        .iter()
        .any(|e| matches!(e, DevEvent::FileChanged { path } if path == "README.md")));
    assert_eq!(builder.build_count(), 2);
    assert_eq!(summary.builds, 2);
    assert_eq!(executor.calls().len(), 1);
}
