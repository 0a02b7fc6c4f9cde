//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod fingerprint;
mod ignore_patterns;
mod input_manifest;

pub use config_warning::ConfigWarning;
pub use fingerprint::Fingerprint;
pub use ignore_patterns::{IgnorePatterns, IGNORE_FILE};
pub use input_manifest::{normalize_key, InputManifest};
