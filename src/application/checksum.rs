//! Checksum engine
//!
//! Fingerprints an artifact from the rendered templates of its deployable
//! units. Only template content participates, so the build directory path
//! and build time never change the result.

use std::fs;
use std::path::Path;

use crate::domain::entities::{Artifact, DeployableUnit};
use crate::domain::value_objects::Fingerprint;
use crate::error::{StackError, StackResult};
use crate::infrastructure::assembly::read_assembly;

/// Fingerprint a built artifact.
///
/// Fails with [`StackError::ArtifactRead`] if any unit's template is
/// missing or unreadable.
pub fn fingerprint(artifact: &Artifact) -> StackResult<Fingerprint> {
    fingerprint_units(artifact.directory(), artifact.units())
}

/// Fingerprint a synth output directory straight from its `manifest.json`.
pub fn fingerprint_directory(dir: &Path) -> StackResult<Fingerprint> {
    let manifest = read_assembly(dir)?;
    fingerprint_units(dir, manifest.units())
}

fn fingerprint_units(dir: &Path, units: &[DeployableUnit]) -> StackResult<Fingerprint> {
    let templates = units
        .iter()
        .map(|unit| {
            let path = dir.join(&unit.template_file);
            fs::read_to_string(&path).map_err(|source| StackError::ArtifactRead { path, source })
        })
        .collect::<StackResult<Vec<_>>>()?;

    Ok(Fingerprint::of_templates(&templates))
}
