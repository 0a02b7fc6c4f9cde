//! Console event sink
//!
//! Timestamped, optionally coloured lines for the terminal. Failures go to
//! stderr; everything else to stdout.

use std::io::{self, Write};
use std::sync::Mutex;

use stackdev::{DevEvent, DevEventSink};

use crate::ui::context::UiContext;
use crate::ui::views::dev::render_dev_event;

pub struct ConsoleEventSink {
    ui: UiContext,
    // Serializes lines from the loop, deploy and logger threads
    lock: Mutex<()>,
}

impl ConsoleEventSink {
    pub fn new(ui: UiContext) -> Self {
        Self {
            ui,
            lock: Mutex::new(()),
        }
    }

    fn verbose(&self) -> bool {
        self.ui.verbose > 0
    }
}

/// Whether `event` is printed at the given verbosity.
fn is_shown(event: &DevEvent, verbose: bool) -> bool {
    match event {
        DevEvent::FileChanged { .. } | DevEvent::FileIgnored { .. } => verbose,
        _ => true,
    }
}

fn is_failure(event: &DevEvent) -> bool {
    matches!(
        event,
        DevEvent::BuildFailed { .. } | DevEvent::DeployFailed { .. } | DevEvent::Warning { .. }
    )
}

impl DevEventSink for ConsoleEventSink {
    fn on_event(&self, event: DevEvent) {
        if !is_shown(&event, self.verbose()) {
            return;
        }

        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        let rendered = render_dev_event(&timestamp, &event, self.ui.color, self.ui.unicode);

        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        if is_failure(&event) {
            let _ = io::stderr().write_all(rendered.as_bytes());
        } else {
            let mut out = io::stdout().lock();
            let _ = out.write_all(rendered.as_bytes());
            let _ = out.flush();
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbose()
    }
}
