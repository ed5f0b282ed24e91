//! Plan configuration: the explicit "current workspace" context
//!
//! Resolution never reads process state. The caller builds a [`PlanConfig`]
//! once, at the edge, from these sources (later sources override earlier):
//!
//! 1. **Environment** - `WSCONF_*` variables ([`PlanConfig::from_env`])
//! 2. **Plan file** - `.wsconf.json` next to the module ([`PlanConfig::load`])
//! 3. **Active-workspace manifest** - YAML connection overrides
//!    ([`PlanConfig::apply_overrides_file`])
//!
//! and threads it into every resolution call.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::connection::ConnectionScope;
use crate::error::{Error, Result};
use crate::overrides::LocalOverrides;
use crate::workspace::{ConnectionTarget, WorkspaceTarget};

/// Default plan file name.
pub const PLAN_FILENAME: &str = ".wsconf.json";

pub const ENV_ORG: &str = "WSCONF_ORG";
pub const ENV_STACK_ID: &str = "WSCONF_STACK_ID";
pub const ENV_STACK_NAME: &str = "WSCONF_STACK_NAME";
pub const ENV_BLOCK_ID: &str = "WSCONF_BLOCK_ID";
pub const ENV_BLOCK_NAME: &str = "WSCONF_BLOCK_NAME";
pub const ENV_BLOCK_REF: &str = "WSCONF_BLOCK_REF";
pub const ENV_ENV_ID: &str = "WSCONF_ENV_ID";
pub const ENV_ENV_NAME: &str = "WSCONF_ENV_NAME";
pub const ENV_CAPABILITY_ID: &str = "WSCONF_CAPABILITY_ID";
pub const ENV_WORKSPACE_UID: &str = "WSCONF_WORKSPACE_UID";

/// The workspace a plan runs in, plus its local connection overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanConfig {
    #[serde(default)]
    pub org_name: String,
    #[serde(default)]
    pub stack_id: i64,
    #[serde(default)]
    pub stack_name: String,
    #[serde(default)]
    pub block_id: i64,
    #[serde(default)]
    pub block_name: String,
    #[serde(default)]
    pub block_ref: String,
    #[serde(default)]
    pub env_id: i64,
    #[serde(default)]
    pub env_name: String,
    /// Non-zero when the plan runs on behalf of a capability.
    #[serde(default)]
    pub capability_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_uid: Option<Uuid>,
    #[serde(default)]
    pub connections: LocalOverrides,
}

/// A plan file; every field is optional so it can be layered over defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanFile {
    org_name: Option<String>,
    stack_id: Option<i64>,
    stack_name: Option<String>,
    block_id: Option<i64>,
    block_name: Option<String>,
    block_ref: Option<String>,
    env_id: Option<i64>,
    env_name: Option<String>,
    capability_id: Option<i64>,
    workspace_uid: Option<Uuid>,
    connections: Option<LocalOverrides>,
}

impl PlanConfig {
    /// Build defaults from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Build defaults from an arbitrary variable lookup.
    ///
    /// Unset or empty variables leave the field at its default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEnvVar`] if a numeric id or the workspace uid
    /// does not parse.
    pub fn from_env_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |name: &str| lookup(name).unwrap_or_default();

        Ok(Self {
            org_name: text(ENV_ORG),
            stack_id: parse_var(&lookup, ENV_STACK_ID)?.unwrap_or_default(),
            stack_name: text(ENV_STACK_NAME),
            block_id: parse_var(&lookup, ENV_BLOCK_ID)?.unwrap_or_default(),
            block_name: text(ENV_BLOCK_NAME),
            block_ref: text(ENV_BLOCK_REF),
            env_id: parse_var(&lookup, ENV_ENV_ID)?.unwrap_or_default(),
            env_name: text(ENV_ENV_NAME),
            capability_id: parse_var(&lookup, ENV_CAPABILITY_ID)?.unwrap_or_default(),
            workspace_uid: parse_var(&lookup, ENV_WORKSPACE_UID)?,
            connections: LocalOverrides::default(),
        })
    }

    /// Overlay the JSON plan file at `path` on top of `defaults`.
    ///
    /// A missing file returns `defaults` unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the file is not a valid plan.
    pub fn load(path: &Path, defaults: PlanConfig) -> Result<Self> {
        if !path.is_file() {
            tracing::debug!(?path, "No plan file found, using defaults");
            return Ok(defaults);
        }

        tracing::debug!(?path, "Loading plan file");
        let content = fs::read_to_string(path)?;
        let file: PlanFile = serde_json::from_str(&content).map_err(|e| Error::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(defaults.overlay(file))
    }

    /// Merge connection overrides from an active-workspace YAML manifest.
    ///
    /// Manifest entries win over plan-file entries of the same name. A missing
    /// manifest is not an error.
    pub fn apply_overrides_file(&mut self, path: &Path) -> Result<()> {
        if !path.is_file() {
            tracing::debug!(?path, "No workspace manifest found, skipping overrides");
            return Ok(());
        }

        let content = fs::read_to_string(path)?;
        let overrides = LocalOverrides::from_yaml_str(&content).map_err(|e| Error::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!(?path, count = overrides.len(), "Loaded connection overrides");
        self.connections.merge(&overrides);
        Ok(())
    }

    pub fn with_override(mut self, name: impl Into<String>, target: ConnectionTarget) -> Self {
        self.connections.insert(name, target);
        self
    }

    /// The workspace this plan runs in.
    pub fn workspace_target(&self) -> WorkspaceTarget {
        WorkspaceTarget {
            stack_id: self.stack_id,
            stack_name: self.stack_name.clone(),
            block_id: self.block_id,
            block_name: self.block_name.clone(),
            block_ref: self.block_ref.clone(),
            env_id: self.env_id,
            env_name: self.env_name.clone(),
        }
    }

    /// Which connection set connection readers should use.
    pub fn connection_scope(&self) -> ConnectionScope {
        if self.capability_id > 0 {
            ConnectionScope::Capability(self.capability_id)
        } else {
            ConnectionScope::Workspace
        }
    }

    fn overlay(mut self, file: PlanFile) -> Self {
        if let Some(v) = file.org_name {
            self.org_name = v;
        }
        if let Some(v) = file.stack_id {
            self.stack_id = v;
        }
        if let Some(v) = file.stack_name {
            self.stack_name = v;
        }
        if let Some(v) = file.block_id {
            self.block_id = v;
        }
        if let Some(v) = file.block_name {
            self.block_name = v;
        }
        if let Some(v) = file.block_ref {
            self.block_ref = v;
        }
        if let Some(v) = file.env_id {
            self.env_id = v;
        }
        if let Some(v) = file.env_name {
            self.env_name = v;
        }
        if let Some(v) = file.capability_id {
            self.capability_id = v;
        }
        if file.workspace_uid.is_some() {
            self.workspace_uid = file.workspace_uid;
        }
        if let Some(connections) = file.connections {
            self.connections.merge(&connections);
        }
        self
    }
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| Error::InvalidEnvVar {
                    name: name.to_string(),
                    value,
                })
        }
        _ => Ok(None),
    }
}
