//! A fresh process always deploys its first successful build.

use std::sync::Arc;
use std::time::Duration;

use stackdev::{BuildCoordinator, BuildOutcome, DeployCoordinator, EventBus};

use crate::common::{FakeBuilder, GatedExecutor, RecordingSink};

#[test]
fn first_build_is_deployed() {
    let dir = tempfile::tempdir().unwrap();
    let builder = FakeBuilder::new(dir.path(), &["lib/api.ts"]);
    builder.then_render(&[("Api", "{\"Resources\":{}}")]);
    let (executor, gate) = GatedExecutor::new();
    drop(gate.release);

    let sink = RecordingSink::new();
    let deployer = DeployCoordinator::new(executor.clone(), sink.clone());
    let builds = BuildCoordinator::new(
        builder.clone(),
        Arc::clone(&deployer),
        EventBus::new(),
        sink,
        dir.path().join("out"),
    );

    let outcome = builds.build().unwrap();
    assert!(matches!(outcome, BuildOutcome::Queued { waiting: false, .. }));
    assert!(deployer.wait_idle(Some(Duration::from_secs(5))));

    assert_eq!(executor.calls(), vec![dir.path().join("out/build-0")]);
    assert_eq!(
        deployer.last_deployed(),
        match outcome {
            BuildOutcome::Queued { fingerprint, .. } => Some(fingerprint),
            BuildOutcome::Unchanged(_) => None,
        }
    );
}
