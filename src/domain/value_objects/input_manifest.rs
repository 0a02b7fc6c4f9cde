//! Input Manifest Value Object
//!
//! Records which project files fed the most recent build. Keys are
//! project-relative paths using `/` separators on every platform.

use std::collections::BTreeMap;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

/// Mapping of project-relative path to "was an input of the last build".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, bool>")]
pub struct InputManifest(BTreeMap<String, bool>);

impl InputManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a path (normalized) and whether it was used
    pub fn insert(&mut self, path: impl AsRef<str>, used: bool) {
        self.0.insert(normalize_key(path.as_ref()), used);
    }

    /// True when `path` is a recorded input of the last build.
    ///
    /// Paths absent from the manifest and paths recorded as `false` are
    /// both irrelevant.
    pub fn is_input(&self, path: &str) -> bool {
        self.0.get(&normalize_key(path)).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate recorded inputs (entries marked `true`)
    pub fn inputs(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, used)| **used)
            .map(|(path, _)| path.as_str())
    }
}

impl<S: AsRef<str>> FromIterator<(S, bool)> for InputManifest {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let mut manifest = Self::new();
        for (path, used) in iter {
            manifest.insert(path, used);
        }
        manifest
    }
}

impl From<BTreeMap<String, bool>> for InputManifest {
    fn from(raw: BTreeMap<String, bool>) -> Self {
        raw.into_iter().collect()
    }
}

/// Normalize a relative path into a manifest key.
///
/// Backslashes become `/`, `.` segments and leading `./` are dropped.
pub fn normalize_key(path: &str) -> String {
    let unified = path.replace('\\', "/");
    Path::new(&unified)
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
