//! Error types for wsconf-connect

use std::fmt;

/// Result type for connection resolution
pub type Result<T> = std::result::Result<T, Error>;

/// Which collaborator call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOperation {
    RunConfig,
    Workspace,
    Outputs,
}

impl fmt::Display for FetchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchOperation::RunConfig => write!(f, "run-config"),
            FetchOperation::Workspace => write!(f, "workspace"),
            FetchOperation::Outputs => write!(f, "outputs"),
        }
    }
}

/// Errors raised by collaborator implementations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("{what} not found")]
    NotFound { what: String },

    #[error("{message}")]
    Unavailable { message: String },
}

/// Errors that can occur while resolving or reading a connection
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A hop of a `via` chain could not be resolved; `index` is zero-based
    #[error(
        "via connection ({hop}, hop {index}) was not found in workspace {workspace} (via={via})"
    )]
    ViaConnectionNotFound {
        workspace: String,
        via: String,
        hop: String,
        index: usize,
    },

    #[error(
        "retrieved connection '{connection}', but the contracts do not match (wanted={wanted}, actual={actual})"
    )]
    ContractMismatch {
        connection: String,
        wanted: String,
        actual: String,
    },

    #[error(
        "retrieved connection '{connection}', but the connection types do not match (wanted={wanted}, actual={actual})"
    )]
    TypeMismatch {
        connection: String,
        wanted: String,
        actual: String,
    },

    /// A collaborator fetch failed
    #[error("error retrieving {operation} for workspace {workspace}: {source}")]
    Fetch {
        operation: FetchOperation,
        workspace: String,
        source: FetchError,
    },

    /// Model error from wsconf-model
    #[error(transparent)]
    Model(#[from] wsconf_model::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this is the via-hop-not-found condition.
    pub fn is_via_not_found(&self) -> bool {
        matches!(self, Error::ViaConnectionNotFound { .. })
    }

    pub(crate) fn fetch(
        operation: FetchOperation,
        workspace: &impl fmt::Display,
        source: FetchError,
    ) -> Self {
        Error::Fetch {
            operation,
            workspace: workspace.to_string(),
            source,
        }
    }
}
