//! Data model for workspace-scoped configuration resolution
//!
//! This crate holds the shapes that the connection resolver and the variable
//! engine operate on:
//!
//! - **Workspace addressing**: [`WorkspaceTarget`] and relative
//!   [`ConnectionTarget`] references
//! - **Contracts**: wildcard capability selectors ([`Contract`])
//! - **Connections**: declarations, run-configuration records and scopes
//! - **Plan context**: the explicit current workspace ([`PlanConfig`]) and its
//!   [`LocalOverrides`]
//!
//! Nothing here performs network I/O. Plan and manifest files are read only
//! when a caller asks for them.

pub mod connection;
pub mod contract;
pub mod error;
pub mod overrides;
pub mod plan;
pub mod workspace;

pub use connection::{
    CapabilityConfig, ConnectionDeclaration, ConnectionRecord, ConnectionScope, Connections,
    Requirement, RunConfig, VIA_DELIMITER, validate_connection_name,
};
pub use contract::{Contract, WILDCARD};
pub use error::{Error, Result};
pub use overrides::LocalOverrides;
pub use plan::{PLAN_FILENAME, PlanConfig};
pub use workspace::{ConnectionTarget, Workspace, WorkspaceTarget};
