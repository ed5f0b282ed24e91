//! Connection resolution for wsconf
//!
//! - [`ConnectionResolver`] walks a workspace's connections, including `via`
//!   chains, to the workspace that satisfies a declaration
//! - [`ConnectionReader`] adds workspace identity and output lookups and
//!   reports problems as diagnostics
//! - [`SnapshotStore`] answers the collaborator traits from captured data
//!
//! All service access goes through the traits in [`source`].

pub mod error;
pub mod reader;
pub mod resolver;
pub mod source;
pub mod store;

pub use error::{Error, FetchError, FetchOperation, Result};
pub use reader::{ConnectionReader, ConnectionReadout, Diagnostic, Severity};
pub use resolver::{ConnectionResolver, ResolveContext, check_compatibility};
pub use source::{Outputs, OutputsSource, RunConfigSource, WorkspaceDirectory};
pub use store::SnapshotStore;
