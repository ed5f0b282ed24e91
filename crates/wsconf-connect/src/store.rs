//! In-memory snapshot of the collaborator services
//!
//! A [`SnapshotStore`] answers all three collaborator traits from data
//! captured ahead of time, loadable from JSON:
//!
//! ```json
//! {
//!   "workspaces": [{ "uid": "...", "stackId": 100, "blockId": 101, "envId": 102 }],
//!   "runConfigs": { "<uid>": { "connections": { ... } } },
//!   "outputs": { "<uid>": { "vpc_id": "vpc-123" } }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wsconf_model::{RunConfig, Workspace, WorkspaceTarget};

use crate::error::{FetchError, Result};
use crate::source::{Outputs, OutputsSource, RunConfigSource, WorkspaceDirectory};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotStore {
    #[serde(default)]
    pub workspaces: Vec<Workspace>,
    /// Run configurations keyed by workspace uid.
    #[serde(default)]
    pub run_configs: BTreeMap<Uuid, RunConfig>,
    /// State outputs keyed by workspace uid.
    #[serde(default)]
    pub outputs: BTreeMap<Uuid, Outputs>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(?path, "Loading snapshot store");
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Register a workspace together with its run configuration.
    pub fn with_workspace(mut self, workspace: Workspace, run_config: RunConfig) -> Self {
        self.run_configs.insert(workspace.uid, run_config);
        self.workspaces.push(workspace);
        self
    }

    pub fn with_outputs(mut self, workspace_uid: Uuid, outputs: Outputs) -> Self {
        self.outputs.insert(workspace_uid, outputs);
        self
    }

    pub fn find_workspace(&self, target: &WorkspaceTarget) -> Option<&Workspace> {
        self.workspaces.iter().find(|workspace| workspace.is(target))
    }
}

impl WorkspaceDirectory for SnapshotStore {
    fn workspace(&self, target: &WorkspaceTarget) -> std::result::Result<Workspace, FetchError> {
        self.find_workspace(target)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                what: format!("workspace {}", target.id()),
            })
    }
}

impl RunConfigSource for SnapshotStore {
    fn run_config(&self, target: &WorkspaceTarget) -> std::result::Result<RunConfig, FetchError> {
        let workspace = self.workspace(target)?;
        self.run_configs
            .get(&workspace.uid)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                what: format!("run config for workspace {}", target.id()),
            })
    }
}

impl OutputsSource for SnapshotStore {
    fn outputs(&self, workspace_uid: &Uuid) -> std::result::Result<Outputs, FetchError> {
        self.outputs
            .get(workspace_uid)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                what: format!("outputs for workspace {}", workspace_uid),
            })
    }
}
