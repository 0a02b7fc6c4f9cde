//! Error types for stackdev
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for stackdev operations
pub type StackResult<T> = Result<T, StackError>;

/// Main error type for stackdev operations
#[derive(Error, Debug)]
pub enum StackError {
    /// The build/synthesis step failed
    #[error("build failed: {message}")]
    Build { message: String },

    /// A template referenced by the assembly manifest could not be read
    #[error("cannot read artifact file {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The assembly manifest is missing or malformed
    #[error("invalid assembly manifest {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// The deploy executor itself failed (not a per-unit failure)
    #[error("deploy executor failed: {message}")]
    DeployExecutor { message: String },

    /// Invalid configuration file
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Project root does not exist
    #[error("project directory not found: {path}")]
    ProjectNotFound { path: PathBuf },

    /// Another dev session already holds the project lock
    #[error("another stackdev session is already running in {path}")]
    SessionLocked { path: PathBuf },

    /// File watcher could not be started
    #[error("file watcher error: {message}")]
    Watch { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding/decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StackError {
    /// Stable machine-readable code, used in NDJSON output.
    pub fn code(&self) -> &'static str {
        match self {
            StackError::Build { .. } => "build_failure",
            StackError::ArtifactRead { .. } => "artifact_read_error",
            StackError::ManifestParse { .. } => "manifest_parse_error",
            StackError::DeployExecutor { .. } => "deploy_executor_failure",
            StackError::Config { .. } => "config_error",
            StackError::ProjectNotFound { .. } => "project_not_found",
            StackError::SessionLocked { .. } => "session_locked",
            StackError::Watch { .. } => "watch_error",
            StackError::Io(_) => "io_error",
            StackError::Json(_) => "json_error",
        }
    }

    /// Whether this error belongs to the build half of the loop.
    ///
    /// Build-side errors abandon the attempt without touching deploy state.
    pub fn is_build_failure(&self) -> bool {
        matches!(
            self,
            StackError::Build { .. }
                | StackError::ArtifactRead { .. }
                | StackError::ManifestParse { .. }
        )
    }
}
