//! Artifact Builder Port
//!
//! The external build/synthesis step. The control loop decides *when* to
//! build; implementations decide *how*.

use std::path::{Path, PathBuf};

use crate::domain::entities::Artifact;
use crate::error::StackResult;

/// A compiled project definition, ready to be synthesized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDefinition {
    pub name: String,
    pub root: PathBuf,
}

/// How a synth run will be consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SynthMode {
    /// Continuous local development loop
    #[default]
    Dev,
    /// One-shot deployment
    Deploy,
}

impl SynthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SynthMode::Dev => "dev",
            SynthMode::Deploy => "deploy",
        }
    }
}

/// Builds artifacts from the project sources.
///
/// Unit ordering must be deterministic for unchanged inputs.
pub trait ArtifactBuilder: Send + Sync {
    /// Compile the project definition
    fn build_project(&self) -> StackResult<ProjectDefinition>;

    /// Render the project into `out_dir`
    fn synth(
        &self,
        project: &ProjectDefinition,
        out_dir: &Path,
        mode: SynthMode,
    ) -> StackResult<Artifact>;
}
