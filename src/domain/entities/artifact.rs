//! Artifact entity - the output of one synth run
//!
//! An artifact is a build output directory plus the deployable units
//! (stacks) it contains and the inputs that produced it.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::value_objects::InputManifest;

/// One independently deployed piece of an artifact (a stack).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployableUnit {
    /// Unique name within the artifact
    pub name: String,
    /// Rendered template, relative to the artifact directory
    pub template_file: PathBuf,
}

impl DeployableUnit {
    pub fn new(name: impl Into<String>, template_file: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            template_file: template_file.into(),
        }
    }
}

/// A built, ready-to-deploy bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    directory: PathBuf,
    units: Vec<DeployableUnit>,
    inputs: InputManifest,
}

impl Artifact {
    pub fn new(directory: impl Into<PathBuf>, units: Vec<DeployableUnit>, inputs: InputManifest) -> Self {
        Self {
            directory: directory.into(),
            units,
            inputs,
        }
    }

    /// Directory holding the build outputs
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Deployable units, in synth order
    pub fn units(&self) -> &[DeployableUnit] {
        &self.units
    }

    pub fn unit_names(&self) -> Vec<String> {
        self.units.iter().map(|u| u.name.clone()).collect()
    }

    /// Files that fed this build
    pub fn inputs(&self) -> &InputManifest {
        &self.inputs
    }

    /// Absolute path of a unit's template
    pub fn template_path(&self, unit: &DeployableUnit) -> PathBuf {
        self.directory.join(&unit.template_file)
    }
}
