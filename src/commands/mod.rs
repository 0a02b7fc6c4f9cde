pub mod build;
pub mod deploy;
pub mod fingerprint;
pub mod start;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use stackdev::config::ConfigWarning;
use stackdev::infrastructure::JsonEventSink;
use stackdev::presentation::resolve_root;
use stackdev::{Config, DevEvent, DevEventSink};

use crate::cli::ColorWhen;
use crate::ui::console::ConsoleEventSink;
use crate::ui::context::UiContext;

/// A resolved project: root, merged config and output settings
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
    pub ui: UiContext,
    warnings: Vec<ConfigWarning>,
}

impl Project {
    pub fn load(
        project: Option<&Path>,
        json: bool,
        verbose: u8,
        color: Option<ColorWhen>,
    ) -> Result<Self> {
        let root = resolve_root(project)?;
        let (config, warnings) = Config::load_for_project(&root)?;
        let ui = UiContext::new(json, verbose, color, &config);
        Ok(Self {
            root,
            config,
            ui,
            warnings,
        })
    }

    /// NDJSON sink under `--json`, console sink otherwise.
    pub fn sink(&self) -> Arc<dyn DevEventSink> {
        if self.ui.json {
            Arc::new(JsonEventSink::stdout())
        } else {
            Arc::new(ConsoleEventSink::new(self.ui))
        }
    }

    /// Surface config warnings through `sink`.
    pub fn report_warnings(&self, sink: &dyn DevEventSink) {
        for warning in &self.warnings {
            sink.on_event(DevEvent::Warning {
                message: warning.to_string(),
            });
        }
    }
}
