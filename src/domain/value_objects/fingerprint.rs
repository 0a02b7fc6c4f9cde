//! Fingerprint Value Object
//!
//! Content-addressed identity of a built artifact. Two artifacts with the
//! same deployable templates share a fingerprint no matter where or when
//! they were built.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest over an artifact's deployable templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Separator placed between template bodies before hashing
    pub const SEPARATOR: &'static str = "\n";

    /// Digest a set of template bodies.
    ///
    /// Bodies are sorted first, so the caller's enumeration order never
    /// leaks into the result.
    pub fn of_templates<S: AsRef<str>>(templates: &[S]) -> Self {
        let mut sorted: Vec<&str> = templates.iter().map(AsRef::as_ref).collect();
        sorted.sort_unstable();

        let digest = Sha256::digest(sorted.join(Self::SEPARATOR).as_bytes());
        Self(format!("{:x}", digest))
    }

    /// Wrap an already computed hex digest
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex characters, for display
    pub fn short(&self) -> &str {
        self.0.get(..12).unwrap_or(&self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
