//! Reads assembly manifests from synth output directories

use std::fs;
use std::path::Path;

use crate::domain::services::{AssemblyManifest, MANIFEST_FILE};
use crate::error::{StackError, StackResult};

/// Load and parse `<dir>/manifest.json`.
pub fn read_assembly(dir: &Path) -> StackResult<AssemblyManifest> {
    let path = dir.join(MANIFEST_FILE);
    let content = fs::read_to_string(&path).map_err(|source| StackError::ArtifactRead {
        path: path.clone(),
        source,
    })?;
    AssemblyManifest::parse(&content).map_err(|message| StackError::ManifestParse { path, message })
}
