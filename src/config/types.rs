//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ConfigWarning;
use crate::error::StackResult;

use super::loader;

/// Project configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectConfig {
    /// Defaults to the root directory name
    #[serde(default)]
    pub name: Option<String>,
}

/// Build (synth) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// argv of the synth command
    #[serde(default)]
    pub command: Vec<String>,

    /// Root of the per-build `build-<n>` output directories
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// File in each build directory listing the build's inputs
    #[serde(default = "default_inputs_file")]
    pub inputs_file: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            command: Vec::new(),
            out_dir: default_out_dir(),
            inputs_file: default_inputs_file(),
        }
    }
}

fn default_out_dir() -> PathBuf {
    PathBuf::from(".stackdev/out")
}

fn default_inputs_file() -> String {
    "inputs.json".to_string()
}

/// Deploy executor configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DeployConfig {
    /// argv of the deploy command
    #[serde(default)]
    pub command: Vec<String>,
}

/// File watcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Gitignore-style patterns never reported as changes
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,

    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            ignore: default_ignore(),
            cooldown_ms: default_cooldown_ms(),
        }
    }
}

fn default_ignore() -> Vec<String> {
    vec![
        ".git".to_string(),
        "node_modules".to_string(),
        ".stackdev".to_string(),
    ]
}

fn default_cooldown_ms() -> u64 {
    300
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub deploy: DeployConfig,

    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> StackResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> StackResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Project config, else user config, else defaults; env overrides applied.
    pub fn load_for_project(root: &Path) -> StackResult<(Self, Vec<ConfigWarning>)> {
        loader::load_for_project(root)
    }

    /// Apply environment variable overrides (STACKDEV_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Configured name, or the root directory's name
    pub fn project_name(&self, root: &Path) -> String {
        self.project.name.clone().unwrap_or_else(|| {
            root.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "app".to_string())
        })
    }

    /// Output directory resolved against the project root
    pub fn out_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.build.out_dir)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.watch.cooldown_ms)
    }
}
