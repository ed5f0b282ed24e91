//! Workspace addressing
//!
//! A workspace is one block (module instance) deployed into one environment
//! of one stack. [`WorkspaceTarget`] identifies a workspace; a
//! [`ConnectionTarget`] points at another workspace *relative* to some source
//! workspace, where every omitted part means "same as the source".
//!
//! # Example
//!
//! ```
//! use wsconf_model::{ConnectionTarget, WorkspaceTarget};
//!
//! let app = WorkspaceTarget::new(100, 101, 102);
//! let cluster = app.find_relative(&ConnectionTarget::block(100, 103));
//! assert_eq!(cluster.id(), "100/103/102");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies a single workspace: stack + block + environment.
///
/// Names and the block reference are carried along for display. Two targets
/// are the same workspace iff their stack, block and env ids match, which is
/// what `PartialEq` and `Hash` compare.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceTarget {
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
}

impl WorkspaceTarget {
    /// Create a target from ids only.
    pub fn new(stack_id: i64, block_id: i64, env_id: i64) -> Self {
        Self {
            stack_id,
            block_id,
            env_id,
            ..Self::default()
        }
    }

    /// Attach display names for stack, block and env.
    pub fn with_names(
        mut self,
        stack_name: impl Into<String>,
        block_name: impl Into<String>,
        env_name: impl Into<String>,
    ) -> Self {
        self.stack_name = stack_name.into();
        self.block_name = block_name.into();
        self.env_name = env_name.into();
        self
    }

    /// Stable id of the form `{stackId}/{blockId}/{envId}`.
    pub fn id(&self) -> String {
        format!("{}/{}/{}", self.stack_id, self.block_id, self.env_id)
    }

    /// Human readable id of the form `{stack}/{block}/{env}`.
    pub fn display_id(&self) -> String {
        format!("{}/{}/{}", self.stack_name, self.block_name, self.env_name)
    }

    /// `{stack}/{env}/{block}`
    pub fn slashed_name(&self) -> String {
        format!("{}/{}/{}", self.stack_name, self.env_name, self.block_name)
    }

    /// `{stack}-{env}-{block}`
    pub fn hyphenated_name(&self) -> String {
        format!("{}-{}-{}", self.stack_name, self.env_name, self.block_name)
    }

    /// Tags conventionally applied to resources created in this workspace.
    pub fn tags(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("Stack".to_string(), self.stack_name.clone()),
            ("Env".to_string(), self.env_name.clone()),
            ("Block".to_string(), self.block_name.clone()),
        ])
    }

    /// Resolve a relative [`ConnectionTarget`] against this workspace.
    ///
    /// Explicit ids in `target` take precedence. An omitted stack or block
    /// means "same as this workspace"; an omitted env means "same
    /// environment". Names follow their ids: when an id changes and the target
    /// carries no name for it, the name is left empty rather than borrowed
    /// from an unrelated workspace.
    pub fn find_relative(&self, target: &ConnectionTarget) -> WorkspaceTarget {
        let mut found = self.clone();

        if let Some(stack_id) = explicit(target.stack_id) {
            found.stack_name = pick_name(
                stack_id == self.stack_id,
                &target.stack_name,
                &self.stack_name,
            );
            found.stack_id = stack_id;
        }
        if let Some(block_id) = explicit(target.block_id) {
            let same_block = block_id == self.block_id && found.stack_id == self.stack_id;
            found.block_name = pick_name(same_block, &target.block_name, &self.block_name);
            if !same_block {
                found.block_ref = String::new();
            }
            found.block_id = block_id;
        }
        if let Some(env_id) = explicit(target.env_id) {
            found.env_name = pick_name(env_id == self.env_id, &target.env_name, &self.env_name);
            found.env_id = env_id;
        }

        found
    }
}

impl PartialEq for WorkspaceTarget {
    fn eq(&self, other: &Self) -> bool {
        self.stack_id == other.stack_id
            && self.block_id == other.block_id
            && self.env_id == other.env_id
    }
}

impl Eq for WorkspaceTarget {}

impl Hash for WorkspaceTarget {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.stack_id.hash(state);
        self.block_id.hash(state);
        self.env_id.hash(state);
    }
}

impl fmt::Display for WorkspaceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A reference to a workspace relative to some source workspace.
///
/// Ids of `0` are treated the same as absent ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_name: Option<String>,
}

impl ConnectionTarget {
    /// Point at a block in a stack, in the source's environment.
    pub fn block(stack_id: i64, block_id: i64) -> Self {
        Self {
            stack_id: Some(stack_id),
            block_id: Some(block_id),
            ..Self::default()
        }
    }

    /// Pin the target to an explicit environment.
    pub fn in_env(mut self, env_id: i64) -> Self {
        self.env_id = Some(env_id);
        self
    }

    pub fn with_block_name(mut self, block_name: impl Into<String>) -> Self {
        self.block_name = Some(block_name.into());
        self
    }
}

/// A workspace as known to the workspace directory, including its stable uid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub uid: Uuid,
    #[serde(default)]
    pub org_name: String,
    pub stack_id: i64,
    #[serde(default)]
    pub stack_name: String,
    pub block_id: i64,
    #[serde(default)]
    pub block_name: String,
    pub env_id: i64,
    #[serde(default)]
    pub env_name: String,
}

impl Workspace {
    pub fn target(&self) -> WorkspaceTarget {
        WorkspaceTarget::new(self.stack_id, self.block_id, self.env_id).with_names(
            self.stack_name.clone(),
            self.block_name.clone(),
            self.env_name.clone(),
        )
    }

    pub fn is(&self, target: &WorkspaceTarget) -> bool {
        self.target() == *target
    }
}

fn explicit(id: Option<i64>) -> Option<i64> {
    id.filter(|id| *id != 0)
}

fn pick_name(same: bool, target_name: &Option<String>, source_name: &str) -> String {
    match target_name {
        Some(name) if !name.is_empty() => name.clone(),
        _ if same => source_name.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> WorkspaceTarget {
        WorkspaceTarget::new(100, 101, 102).with_names("stack0", "faceless", "env0")
    }

    #[test]
    fn id_uses_stack_block_env_order() {
        assert_eq!(app().id(), "100/101/102");
        assert_eq!(app().display_id(), "stack0/faceless/env0");
        assert_eq!(app().slashed_name(), "stack0/env0/faceless");
        assert_eq!(app().hyphenated_name(), "stack0-env0-faceless");
    }

    #[test]
    fn equality_ignores_names() {
        let named = app();
        let bare = WorkspaceTarget::new(100, 101, 102);
        assert_eq!(named, bare);
        assert_ne!(named, WorkspaceTarget::new(100, 101, 103));
    }

    #[test]
    fn relative_target_inherits_environment() {
        let target = ConnectionTarget::block(100, 103).with_block_name("lycan");
        let found = app().find_relative(&target);
        assert_eq!(found.id(), "100/103/102");
        assert_eq!(found.block_name, "lycan");
        assert_eq!(found.stack_name, "stack0");
        assert_eq!(found.env_name, "env0");
    }

    #[test]
    fn relative_target_honours_explicit_env() {
        let found = app().find_relative(&ConnectionTarget::block(100, 103).in_env(200));
        assert_eq!(found.id(), "100/103/200");
        assert_eq!(found.env_name, "");
    }

    #[test]
    fn zero_ids_mean_inherit() {
        let target = ConnectionTarget {
            stack_id: Some(0),
            block_id: Some(105),
            env_id: Some(0),
            ..ConnectionTarget::default()
        };
        assert_eq!(app().find_relative(&target).id(), "100/105/102");
    }

    #[test]
    fn empty_target_is_the_source() {
        assert_eq!(app().find_relative(&ConnectionTarget::default()), app());
    }

    #[test]
    fn tags_name_stack_env_block() {
        let tags = app().tags();
        assert_eq!(tags["Stack"], "stack0");
        assert_eq!(tags["Env"], "env0");
        assert_eq!(tags["Block"], "faceless");
    }
}
