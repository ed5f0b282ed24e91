//! External collaborators
//!
//! The resolver and the read handler never talk to a service directly. They
//! ask these traits, and the caller decides whether the answer comes from an
//! API client, a cache or a [`SnapshotStore`](crate::SnapshotStore).
//!
//! Implementations own retry and timeout policy. A failed call is returned as
//! a [`FetchError`] and wrapped with workspace context by the caller.

use std::collections::BTreeMap;

use uuid::Uuid;
use wsconf_model::{RunConfig, Workspace, WorkspaceTarget};

use crate::error::FetchError;

/// Root-level outputs of a workspace's state, keyed by output name.
pub type Outputs = BTreeMap<String, serde_json::Value>;

/// Fetches the latest run configuration of a workspace.
pub trait RunConfigSource {
    /// "Not found" is an error here, not an empty connection set.
    fn run_config(&self, target: &WorkspaceTarget) -> Result<RunConfig, FetchError>;
}

/// Resolves a workspace target to the workspace's stable identity.
pub trait WorkspaceDirectory {
    fn workspace(&self, target: &WorkspaceTarget) -> Result<Workspace, FetchError>;
}

/// Fetches state outputs by workspace uid.
pub trait OutputsSource {
    fn outputs(&self, workspace_uid: &Uuid) -> Result<Outputs, FetchError>;
}

impl<T: RunConfigSource + ?Sized> RunConfigSource for &T {
    fn run_config(&self, target: &WorkspaceTarget) -> Result<RunConfig, FetchError> {
        (**self).run_config(target)
    }
}

impl<T: WorkspaceDirectory + ?Sized> WorkspaceDirectory for &T {
    fn workspace(&self, target: &WorkspaceTarget) -> Result<Workspace, FetchError> {
        (**self).workspace(target)
    }
}

impl<T: OutputsSource + ?Sized> OutputsSource for &T {
    fn outputs(&self, workspace_uid: &Uuid) -> Result<Outputs, FetchError> {
        (**self).outputs(workspace_uid)
    }
}
