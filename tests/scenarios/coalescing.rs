//! Builds that land while a deployment runs collapse into one follow-up.

use std::sync::Arc;
use std::time::Duration;

use stackdev::{BuildCoordinator, BuildOutcome, DeployCoordinator, DevEvent, EventBus};

use crate::common::{FakeBuilder, GatedExecutor, RecordingSink};

const WAIT: Duration = Duration::from_secs(5);

#[test]
fn only_the_newest_build_follows_the_running_deploy() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let builder = FakeBuilder::new(dir.path(), &["lib/api.ts"]);
    builder
        .then_render(&[("Api", "A")])
        .then_render(&[("Api", "B")])
        .then_render(&[("Api", "C")]);
    let (executor, gate) = GatedExecutor::new();

    let sink = RecordingSink::new();
    let deployer = DeployCoordinator::new(executor.clone(), sink.clone());
    let builds = BuildCoordinator::new(
        builder.clone(),
        Arc::clone(&deployer),
        EventBus::new(),
        sink.clone(),
        &out,
    );

    builds.build().unwrap();
    assert_eq!(gate.entered.recv_timeout(WAIT).unwrap(), out.join("build-0"));

    // Both land while A is still deploying
    let b = builds.build().unwrap();
    let c = builds.build().unwrap();
    assert!(matches!(b, BuildOutcome::Queued { waiting: true, .. }));
    assert!(matches!(c, BuildOutcome::Queued { waiting: true, .. }));

    gate.release.send(()).unwrap();
    assert_eq!(gate.entered.recv_timeout(WAIT).unwrap(), out.join("build-2"));
    gate.release.send(()).unwrap();
    assert!(deployer.wait_idle(Some(WAIT)));

    assert_eq!(executor.calls(), vec![out.join("build-0"), out.join("build-2")]);
    assert_eq!(executor.max_in_flight(), 1);
    assert_eq!(
        sink.events()
            .iter()
            .filter(|e| matches!(e, DevEvent::DeployComplete { .. }))
            .count(),
        2
    );
}

#[test]
fn many_builds_during_one_deploy_cost_exactly_one_more() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let builder = FakeBuilder::new(dir.path(), &["lib/api.ts"]);
    for n in 0..6 {
        builder.then_render(&[("Api", &format!("v{}", n))]);
    }
    let (executor, gate) = GatedExecutor::new();

    let sink = RecordingSink::new();
    let deployer = DeployCoordinator::new(executor.clone(), sink.clone());
    let builds = BuildCoordinator::new(builder.clone(), Arc::clone(&deployer), EventBus::new(), sink, &out);

    builds.build().unwrap();
    gate.entered.recv_timeout(WAIT).unwrap();
    for _ in 1..6 {
        builds.build().unwrap();
    }
    drop(gate.release);
    assert!(deployer.wait_idle(Some(WAIT)));

    assert_eq!(executor.calls().len(), 2);
    assert_eq!(executor.calls()[1], out.join("build-5"));
    assert_eq!(executor.max_in_flight(), 1);
}
