//! Filesystem watcher
//!
//! Publishes `file.changed` on the bus for every non-ignored path under the
//! project root. Paths are project-relative and `/`-separated, matching
//! the keys of the input manifest.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::domain::value_objects::{normalize_key, IgnorePatterns};
use crate::error::{StackError, StackResult};
use crate::infrastructure::bus::{BusEvent, EventBus};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What to watch and what to leave out
#[derive(Debug, Clone)]
pub struct WatchSettings {
    pub root: PathBuf,
    /// Build output; never reported, since every build rewrites it
    pub out_dir: PathBuf,
    pub ignore: IgnorePatterns,
    /// Events arriving this soon after start are dropped
    pub cooldown: Duration,
}

/// Map an absolute event path to the key published on the bus.
///
/// `None` for paths outside the root, inside the output directory, or
/// matched by the ignore patterns.
pub fn project_key(settings: &WatchSettings, path: &Path) -> Option<String> {
    if path.starts_with(&settings.out_dir) {
        return None;
    }
    let rel = path.strip_prefix(&settings.root).ok()?;
    if rel.as_os_str().is_empty() || settings.ignore.is_ignored(rel, path.is_dir()) {
        return None;
    }
    Some(normalize_key(&rel.to_string_lossy()))
}

fn watch_error(e: notify::Error) -> StackError {
    StackError::Watch {
        message: e.to_string(),
    }
}

pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl FileWatcher {
    /// Start watching `settings.root` recursively.
    pub fn start(mut settings: WatchSettings, bus: EventBus) -> StackResult<Self> {
        // notify reports canonical paths on some platforms
        settings.root = settings.root.canonicalize()?;
        if let Ok(out_dir) = settings.out_dir.canonicalize() {
            settings.out_dir = out_dir;
        }

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    if matches!(event.kind, EventKind::Access(_)) {
                        return;
                    }
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
            },
            Config::default(),
        )
        .map_err(watch_error)?;
        watcher
            .watch(&settings.root, RecursiveMode::Recursive)
            .map_err(watch_error)?;

        let stop = Arc::new(AtomicBool::new(false));
        let worker = {
            let stop = Arc::clone(&stop);
            std::thread::Builder::new()
                .name("stackdev-watch".to_string())
                .spawn(move || {
                    // Startup cooldown: notify sometimes replays existing files
                    let cooldown_end = Instant::now() + settings.cooldown;
                    while Instant::now() < cooldown_end && !stop.load(Ordering::SeqCst) {
                        let _ = rx.recv_timeout(POLL_INTERVAL);
                    }

                    while !stop.load(Ordering::SeqCst) {
                        match rx.recv_timeout(POLL_INTERVAL) {
                            Ok(path) => {
                                if let Some(key) = project_key(&settings, &path) {
                                    bus.publish(BusEvent::FileChanged { path: key });
                                }
                            }
                            Err(RecvTimeoutError::Timeout) => continue,
                            Err(RecvTimeoutError::Disconnected) => break,
                        }
                    }
                })?
        };

        Ok(Self {
            _watcher: watcher,
            stop,
            worker: Some(worker),
        })
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}
