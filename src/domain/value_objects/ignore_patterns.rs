//! Ignore patterns value object
//!
//! Paths the file watcher never reports, matched with gitignore semantics.
//! Patterns come from `[watch] ignore` and an optional `.stackdevignore`
//! file at the project root.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::Path;

use crate::error::{StackError, StackResult};

/// Name of the optional per-project ignore file
pub const IGNORE_FILE: &str = ".stackdevignore";

/// Maximum number of patterns allowed
const MAX_PATTERNS: usize = 1000;

#[derive(Debug, Clone)]
pub struct IgnorePatterns {
    matcher: Gitignore,
    pattern_count: usize,
}

impl IgnorePatterns {
    /// Build a matcher from configured patterns plus `.stackdevignore`, if present.
    pub fn load(root: &Path, configured: &[String]) -> StackResult<Self> {
        let ignore_path = root.join(IGNORE_FILE);
        let file_content = if ignore_path.is_file() {
            fs::read_to_string(&ignore_path)?
        } else {
            String::new()
        };

        let lines = configured
            .iter()
            .map(String::as_str)
            .chain(file_content.lines());
        Self::from_lines(root, &ignore_path, lines)
    }

    /// Build a matcher from raw pattern lines.
    pub fn from_lines<'a>(
        root: &Path,
        source_path: &Path,
        lines: impl IntoIterator<Item = &'a str>,
    ) -> StackResult<Self> {
        let mut builder = GitignoreBuilder::new(root);
        let mut pattern_count = 0;

        for line in lines {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            pattern_count += 1;
            if pattern_count > MAX_PATTERNS {
                return Err(StackError::Config {
                    file: source_path.to_path_buf(),
                    message: format!("more than {} ignore patterns", MAX_PATTERNS),
                });
            }

            builder
                .add_line(Some(source_path.to_path_buf()), trimmed)
                .map_err(|e| StackError::Config {
                    file: source_path.to_path_buf(),
                    message: format!("invalid ignore pattern '{}': {}", trimmed, e),
                })?;
        }

        let matcher = builder.build().map_err(|e| StackError::Config {
            file: source_path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Self {
            matcher,
            pattern_count,
        })
    }

    /// Check if a project-relative path (or any of its parents) is ignored.
    pub fn is_ignored(&self, rel_path: &Path, is_dir: bool) -> bool {
        self.matcher
            .matched_path_or_any_parents(rel_path, is_dir)
            .is_ignore()
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }
}
