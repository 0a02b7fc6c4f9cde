//! Configuration module for stackdev
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (STACKDEV_*)
//! 3. Project config (stackdev.toml)
//! 4. User config (~/.config/stackdev/config.toml), only when there is no project config
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{apply_overrides, CONFIG_FILE};
pub use types::{
    BuildConfig, ColorMode, Config, DeployConfig, OutputConfig, ProjectConfig, WatchConfig,
};
