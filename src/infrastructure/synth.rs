//! Command-driven synthesizer
//!
//! Runs the project's build command, which must write a `manifest.json`
//! (and its templates) into the directory named by `STACKDEV_OUT_DIR`.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::domain::entities::Artifact;
use crate::domain::ports::{ArtifactBuilder, ProjectDefinition, SynthMode};
use crate::domain::value_objects::{IgnorePatterns, InputManifest};
use crate::error::{StackError, StackResult};
use crate::infrastructure::assembly::read_assembly;
use crate::infrastructure::process::run_command;

/// Environment variable carrying the output directory to the build command
pub const OUT_DIR_ENV: &str = "STACKDEV_OUT_DIR";
/// Environment variable carrying the synth mode to the build command
pub const MODE_ENV: &str = "STACKDEV_MODE";

pub struct CommandSynthesizer {
    name: String,
    root: PathBuf,
    command: Vec<String>,
    inputs_file: String,
    ignore: IgnorePatterns,
    /// Never inputs, on top of the build's own output directory
    excluded: Option<PathBuf>,
}

impl CommandSynthesizer {
    pub fn new(
        name: impl Into<String>,
        root: impl Into<PathBuf>,
        command: Vec<String>,
        inputs_file: impl Into<String>,
        ignore: IgnorePatterns,
    ) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            command,
            inputs_file: inputs_file.into(),
            ignore,
            excluded: None,
        }
    }

    /// Leave `dir` (typically the output root holding every build) out of
    /// the default input walk.
    pub fn excluding(mut self, dir: impl Into<PathBuf>) -> Self {
        self.excluded = Some(dir.into());
        self
    }

    /// Inputs declared by the build, or every non-ignored project file.
    fn read_inputs(&self, project: &ProjectDefinition, out_dir: &Path) -> StackResult<InputManifest> {
        let declared = out_dir.join(&self.inputs_file);
        if declared.is_file() {
            let content = fs::read_to_string(&declared).map_err(|source| {
                StackError::ArtifactRead {
                    path: declared.clone(),
                    source,
                }
            })?;
            return serde_json::from_str(&content).map_err(|e| StackError::ManifestParse {
                path: declared,
                message: e.to_string(),
            });
        }
        Ok(self.walk_inputs(&project.root, out_dir))
    }

    fn walk_inputs(&self, root: &Path, out_dir: &Path) -> InputManifest {
        let mut inputs = InputManifest::new();
        let walker = WalkBuilder::new(root).hidden(false).build();
        for entry in walker.flatten() {
            let path = entry.path();
            let excluded = self.excluded.as_deref().is_some_and(|dir| path.starts_with(dir));
            if excluded || path.starts_with(out_dir) || !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let Ok(rel) = path.strip_prefix(root) else {
                continue;
            };
            if self.ignore.is_ignored(rel, false) {
                continue;
            }
            inputs.insert(rel.to_string_lossy(), true);
        }
        inputs
    }
}

impl ArtifactBuilder for CommandSynthesizer {
    fn build_project(&self) -> StackResult<ProjectDefinition> {
        if !self.root.is_dir() {
            return Err(StackError::ProjectNotFound {
                path: self.root.clone(),
            });
        }
        if self.command.is_empty() {
            return Err(StackError::Build {
                message: "no build command configured ([build] command)".to_string(),
            });
        }
        Ok(ProjectDefinition {
            name: self.name.clone(),
            root: self.root.clone(),
        })
    }

    fn synth(
        &self,
        project: &ProjectDefinition,
        out_dir: &Path,
        mode: SynthMode,
    ) -> StackResult<Artifact> {
        fs::create_dir_all(out_dir)?;
        let out_dir_value = out_dir.to_string_lossy();
        run_command(
            &self.command,
            &project.root,
            &[(OUT_DIR_ENV, out_dir_value.as_ref()), (MODE_ENV, mode.as_str())],
            None,
        )
        .map_err(|message| StackError::Build { message })?;

        let assembly = read_assembly(out_dir)?;
        let inputs = self.read_inputs(project, out_dir)?;
        Ok(Artifact::new(out_dir, assembly.into_units(), inputs))
    }
}
