//! Local connection overrides
//!
//! Developers can pin connections of the *current* workspace by hand, either
//! in the plan file or in an active-workspace manifest:
//!
//! ```yaml
//! connections:
//!   cluster:
//!     stackId: 100
//!     blockId: 103
//!   network:
//!     stackId: 100
//!     blockId: 105
//!     envId: 200
//! ```
//!
//! Overrides are always consulted before remote connection records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::workspace::ConnectionTarget;

/// Hand-authored connection targets for the current workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalOverrides(BTreeMap<String, ConnectionTarget>);

#[derive(Debug, Default, Deserialize)]
struct ActiveWorkspaceManifest {
    #[serde(default)]
    connections: LocalOverrides,
}

impl LocalOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the `connections` section of an active-workspace YAML manifest.
    ///
    /// Other top-level keys are ignored. An empty document yields no
    /// overrides.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let manifest: ActiveWorkspaceManifest = serde_yaml::from_str(content)?;
        Ok(manifest.connections)
    }

    pub fn get(&self, name: &str) -> Option<&ConnectionTarget> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, target: ConnectionTarget) {
        self.0.insert(name.into(), target);
    }

    pub fn with(mut self, name: impl Into<String>, target: ConnectionTarget) -> Self {
        self.insert(name, target);
        self
    }

    /// Merge `other` into `self`; entries in `other` win.
    pub fn merge(&mut self, other: &LocalOverrides) {
        for (name, target) in &other.0 {
            self.0.insert(name.clone(), target.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConnectionTarget)> {
        self.0.iter()
    }
}
