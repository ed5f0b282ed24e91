//! Shared test fixtures for the wsconf workspace.
//!
//! This crate is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`topology`]: a small stack of connected workspaces as a snapshot store
//! - [`stores`]: collaborator wrappers that count calls or inject failures
//! - [`files`]: plan, manifest and store files in a temporary directory

pub mod files;
pub mod stores;
pub mod topology;
