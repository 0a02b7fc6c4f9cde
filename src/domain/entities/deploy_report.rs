//! Deploy report entity - structured per-unit deployment outcome
//!
//! Per-unit failures are data, not errors: the report is inspected and
//! printed, and never aborts the control loop.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome of deploying a single unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    Success,
    Failed,
}

/// One resource-level error reported for a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceError {
    pub id: String,
    pub message: String,
}

/// Result for one unit: status plus resource id → message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitResult {
    pub status: UnitStatus,
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

impl UnitResult {
    pub fn success() -> Self {
        Self {
            status: UnitStatus::Success,
            errors: BTreeMap::new(),
        }
    }

    pub fn failed(errors: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            status: UnitStatus::Failed,
            errors: errors.into_iter().collect(),
        }
    }

    pub fn resource_errors(&self) -> Vec<ResourceError> {
        self.errors
            .iter()
            .map(|(id, message)| ResourceError {
                id: id.clone(),
                message: message.clone(),
            })
            .collect()
    }
}

/// Mapping of unit name to its result, as returned by a deploy executor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeployReport {
    units: BTreeMap<String, UnitResult>,
}

impl DeployReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, unit: impl Into<String>, result: UnitResult) {
        self.units.insert(unit.into(), result);
    }

    pub fn with(mut self, unit: impl Into<String>, result: UnitResult) -> Self {
        self.insert(unit, result);
        self
    }

    pub fn get(&self, unit: &str) -> Option<&UnitResult> {
        self.units.get(unit)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Count units that failed
    pub fn failed_count(&self) -> usize {
        self.units
            .values()
            .filter(|r| r.status == UnitStatus::Failed)
            .count()
    }
}
