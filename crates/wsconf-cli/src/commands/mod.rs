//! Command implementations

pub mod interpolate;
pub mod resolve;
pub mod workspace;

pub use interpolate::{run_interpolate, run_secret_keys};
pub use resolve::run_resolve;
pub use workspace::run_workspace;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{CliError, Result};

/// Read a JSON object of string values; `None` yields an empty map.
fn read_string_map(path: Option<&Path>) -> Result<BTreeMap<String, String>> {
    let Some(path) = path else {
        return Ok(BTreeMap::new());
    };
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        CliError::user(format!(
            "{} must be a JSON object of string values: {}",
            path.display(),
            e
        ))
    })
}
