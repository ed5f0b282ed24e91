//! Collaborator wrappers for observing and breaking a store.

use std::cell::Cell;

use uuid::Uuid;
use wsconf_connect::{FetchError, Outputs, OutputsSource, RunConfigSource, WorkspaceDirectory};
use wsconf_model::{RunConfig, Workspace, WorkspaceTarget};

/// Wraps a store, counting calls and optionally failing some of them.
pub struct RecordingStore<S> {
    inner: S,
    run_config_calls: Cell<usize>,
    workspace_calls: Cell<usize>,
    outputs_calls: Cell<usize>,
    fail_workspace: bool,
    fail_outputs: bool,
}

impl<S> RecordingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            run_config_calls: Cell::new(0),
            workspace_calls: Cell::new(0),
            outputs_calls: Cell::new(0),
            fail_workspace: false,
            fail_outputs: false,
        }
    }

    /// Make every workspace identity lookup fail as unavailable.
    pub fn failing_workspace(mut self) -> Self {
        self.fail_workspace = true;
        self
    }

    /// Make every outputs fetch fail as unavailable.
    pub fn failing_outputs(mut self) -> Self {
        self.fail_outputs = true;
        self
    }

    pub fn run_config_calls(&self) -> usize {
        self.run_config_calls.get()
    }

    pub fn workspace_calls(&self) -> usize {
        self.workspace_calls.get()
    }

    pub fn outputs_calls(&self) -> usize {
        self.outputs_calls.get()
    }

    /// Total collaborator calls made so far.
    pub fn total_calls(&self) -> usize {
        self.run_config_calls() + self.workspace_calls() + self.outputs_calls()
    }
}

fn unavailable(what: &str) -> FetchError {
    FetchError::Unavailable {
        message: format!("{what} service is unavailable"),
    }
}

impl<S: RunConfigSource> RunConfigSource for RecordingStore<S> {
    fn run_config(&self, target: &WorkspaceTarget) -> Result<RunConfig, FetchError> {
        self.run_config_calls.set(self.run_config_calls.get() + 1);
        self.inner.run_config(target)
    }
}

impl<S: WorkspaceDirectory> WorkspaceDirectory for RecordingStore<S> {
    fn workspace(&self, target: &WorkspaceTarget) -> Result<Workspace, FetchError> {
        self.workspace_calls.set(self.workspace_calls.get() + 1);
        if self.fail_workspace {
            return Err(unavailable("workspace"));
        }
        self.inner.workspace(target)
    }
}

impl<S: OutputsSource> OutputsSource for RecordingStore<S> {
    fn outputs(&self, workspace_uid: &Uuid) -> Result<Outputs, FetchError> {
        self.outputs_calls.set(self.outputs_calls.get() + 1);
        if self.fail_outputs {
            return Err(unavailable("outputs"));
        }
        self.inner.outputs(workspace_uid)
    }
}
