//! Per-project session lock
//!
//! Held for the lifetime of `stackdev start` / `stackdev deploy` so two
//! processes never deploy the same project at once.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{StackError, StackResult};

/// Lock file, relative to the project root
pub const LOCK_FILE: &str = ".stackdev/dev.lock";

#[derive(Debug)]
pub struct SessionLock {
    file: File,
    path: PathBuf,
}

impl SessionLock {
    /// Take the project lock without waiting.
    pub fn acquire(root: &Path) -> StackResult<Self> {
        let path = root.join(LOCK_FILE);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(&path)?;
        file.try_lock_exclusive()
            .map_err(|_| StackError::SessionLocked { path: path.clone() })?;
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SessionLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
