//! Assembly manifest parsing
//!
//! A synth run writes `manifest.json` into its output directory. Every
//! artifact entry whose `type` is [`STACK_ARTIFACT_TYPE`] is a deployable
//! unit; everything else (trees, assets, nested metadata) is ignored.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::entities::DeployableUnit;

/// File name of the assembly manifest inside an output directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// Artifact type tag identifying deployable stack templates
pub const STACK_ARTIFACT_TYPE: &str = "aws:cloudformation:stack";

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    artifacts: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawArtifact {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    properties: Option<RawProperties>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProperties {
    template_file: Option<String>,
    stack_name: Option<String>,
}

/// Parsed assembly manifest: deployable units in manifest key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyManifest {
    units: Vec<DeployableUnit>,
}

impl AssemblyManifest {
    /// Parse manifest JSON.
    ///
    /// The error string is a human-readable reason; callers attach the path.
    pub fn parse(content: &str) -> Result<Self, String> {
        let raw: RawManifest = serde_json::from_str(content).map_err(|e| e.to_string())?;

        let mut units = Vec::new();
        for (key, value) in raw.artifacts {
            let artifact: RawArtifact = serde_json::from_value(value)
                .map_err(|e| format!("artifact '{}': {}", key, e))?;
            if artifact.kind != STACK_ARTIFACT_TYPE {
                continue;
            }

            let properties = artifact
                .properties
                .ok_or_else(|| format!("stack artifact '{}' has no properties", key))?;
            let template_file = properties
                .template_file
                .ok_or_else(|| format!("stack artifact '{}' has no templateFile", key))?;
            let name = properties.stack_name.unwrap_or(key);

            if units.iter().any(|u: &DeployableUnit| u.name == name) {
                return Err(format!("duplicate stack name '{}'", name));
            }
            units.push(DeployableUnit::new(name, template_file));
        }

        Ok(Self { units })
    }

    pub fn units(&self) -> &[DeployableUnit] {
        &self.units
    }

    pub fn into_units(self) -> Vec<DeployableUnit> {
        self.units
    }
}
