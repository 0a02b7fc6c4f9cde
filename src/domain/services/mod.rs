//! Domain Services
//!
//! Stateless logic over domain types. No I/O.

pub mod assembly;

pub use assembly::{AssemblyManifest, MANIFEST_FILE, STACK_ARTIFACT_TYPE};
