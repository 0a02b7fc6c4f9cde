//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ConfigWarning;
use crate::error::{StackError, StackResult};

use super::types::{ColorMode, Config};

/// Project config file name, at the project root
pub const CONFIG_FILE: &str = "stackdev.toml";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> StackResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| StackError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|key| {
            let leaf = key.rsplit('.').next().unwrap_or(key.as_str()).to_string();
            ConfigWarning {
                line: find_line_number(&content, &leaf),
                suggestion: suggest_key(&leaf),
                key,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from project config, user config, or defaults
pub fn load_for_project(root: &Path) -> StackResult<(Config, Vec<ConfigWarning>)> {
    let project_config = root.join(CONFIG_FILE);
    let (config, warnings) = if project_config.is_file() {
        load_with_warnings(&project_config)?
    } else {
        match user_config_path().filter(|p| p.is_file()) {
            Some(user_config) => load_with_warnings(&user_config)?,
            None => (Config::default(), Vec::new()),
        }
    };
    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (STACKDEV_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply `STACKDEV_*` overrides read through `lookup`.
pub fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    // STACKDEV_BUILD_COMMAND (whitespace-separated argv)
    if let Some(command) = lookup("STACKDEV_BUILD_COMMAND").and_then(split_command) {
        config.build.command = command;
    }

    // STACKDEV_DEPLOY_COMMAND
    if let Some(command) = lookup("STACKDEV_DEPLOY_COMMAND").and_then(split_command) {
        config.deploy.command = command;
    }

    // STACKDEV_OUT_DIR
    if let Some(out_dir) = lookup("STACKDEV_OUT_DIR").filter(|v| !v.trim().is_empty()) {
        config.build.out_dir = PathBuf::from(out_dir);
    }

    // STACKDEV_COLOR
    if let Some(color) = lookup("STACKDEV_COLOR").as_deref().and_then(ColorMode::parse) {
        config.output.color = color;
    }

    config
}

fn split_command(value: String) -> Option<Vec<String>> {
    let argv: Vec<String> = value.split_whitespace().map(str::to_string).collect();
    (!argv.is_empty()).then_some(argv)
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("stackdev/config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.trim_start().starts_with(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "project",
        "name",
        "build",
        "command",
        "out_dir",
        "inputs_file",
        "deploy",
        "watch",
        "ignore",
        "cooldown_ms",
        "output",
        "color",
        "unicode",
    ];

    CANDIDATES
        .iter()
        .map(|candidate| (candidate, levenshtein(unknown, candidate)))
        .filter(|(_, dist)| *dist <= 2)
        .min_by_key(|(_, dist)| *dist)
        .map(|(candidate, _)| candidate.to_string())
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
