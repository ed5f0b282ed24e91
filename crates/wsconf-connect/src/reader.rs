//! Connection read handler
//!
//! Wraps [`ConnectionResolver`] with the lookups a caller needs after a
//! target is found: the target's workspace identity and its state outputs.
//! Problems are reported as [`Diagnostic`]s on the [`ConnectionReadout`]
//! rather than as errors, so a plan can show every problem at once.

use serde::Serialize;
use tracing::{debug, warn};
use wsconf_model::ConnectionDeclaration;

use crate::error::{Error, FetchOperation};
use crate::resolver::{ConnectionResolver, ResolveContext};
use crate::source::{Outputs, OutputsSource, RunConfigSource, WorkspaceDirectory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: None,
        }
    }

    pub fn warning(summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}

/// The result of reading one connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionReadout {
    /// `{name}-{workspace_id}`
    pub id: String,
    pub name: String,
    pub contract: String,
    #[serde(rename = "type")]
    pub connection_type: String,
    pub optional: bool,
    pub via: String,
    /// Empty when the connection is unsatisfied.
    pub workspace_id: String,
    pub outputs: Outputs,
    pub diagnostics: Vec<Diagnostic>,
}

impl ConnectionReadout {
    fn new(declaration: &ConnectionDeclaration) -> Self {
        Self {
            id: String::new(),
            name: declaration.name.clone(),
            contract: declaration.contract.clone().unwrap_or_default(),
            connection_type: declaration.connection_type.clone().unwrap_or_default(),
            optional: declaration.optional,
            via: declaration.via.clone().unwrap_or_default(),
            workspace_id: String::new(),
            outputs: Outputs::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity == Severity::Error)
    }

    fn finish(mut self) -> Self {
        self.id = format!("{}-{}", self.name, self.workspace_id);
        self
    }
}

/// Reads connections through the three collaborators of one store.
pub struct ConnectionReader<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S> ConnectionReader<'a, S>
where
    S: RunConfigSource + WorkspaceDirectory + OutputsSource + ?Sized,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Resolve `declaration` and load the target's outputs.
    pub fn read(
        &self,
        context: &ResolveContext,
        declaration: &ConnectionDeclaration,
    ) -> ConnectionReadout {
        let mut readout = ConnectionReadout::new(declaration);

        let target = match ConnectionResolver::new(self.store).resolve(context, declaration) {
            Ok(target) => target,
            Err(e) if e.is_via_not_found() => {
                debug!(name = %declaration.name, "{}", e);
                None
            }
            Err(Error::Model(e @ wsconf_model::Error::InvalidConnectionName { .. })) => {
                readout.diagnostics.push(Diagnostic::error(e.to_string()));
                return readout.finish();
            }
            Err(e) => {
                readout
                    .diagnostics
                    .push(Diagnostic::error("Unable to find workspace.").with_detail(e));
                return readout.finish();
            }
        };

        let Some(target) = target else {
            if !declaration.optional {
                readout.diagnostics.push(Diagnostic::error(format!(
                    "The connection {:?} is missing. It is required to use this plan.",
                    declaration.name
                )));
            }
            return readout.finish();
        };

        readout.workspace_id = target.id();

        let workspace = match self.store.workspace(&target) {
            Ok(workspace) => workspace,
            Err(e) => {
                let error = Error::fetch(FetchOperation::Workspace, &target, e);
                readout.diagnostics.push(
                    Diagnostic::error(format!("Unable to find workspace {}", target.id()))
                        .with_detail(error),
                );
                return readout.finish();
            }
        };

        match self.store.outputs(&workspace.uid) {
            Ok(outputs) => readout.outputs = outputs,
            Err(e) => {
                let error = Error::fetch(FetchOperation::Outputs, &target, e);
                warn!(name = %declaration.name, "{}", error);
                readout.diagnostics.push(
                    Diagnostic::warning(format!(
                        "Unable to download workspace outputs for {:?}. 'outputs' will be empty",
                        target.id()
                    ))
                    .with_detail(error),
                );
            }
        }

        readout.finish()
    }
}
