//! Variable commands

use std::collections::BTreeSet;
use std::path::Path;

use wsconf_vars::{ResolvedVariables, infer_secret_keys, validate_keys};

use super::read_string_map;
use crate::error::Result;

/// Shown in place of secret values.
pub const SENSITIVE_MASK: &str = "(sensitive)";

/// Run the interpolate command
pub fn run_interpolate(
    env: Option<&Path>,
    secrets: Option<&Path>,
    show_secrets: bool,
) -> Result<()> {
    let plain = read_string_map(env)?;
    let secrets = read_string_map(secrets)?;
    validate_keys(plain.keys().chain(secrets.keys()).map(String::as_str))?;

    let mut resolved = ResolvedVariables::resolve(&plain, &secrets);
    if !show_secrets {
        resolved = resolved.masked(SENSITIVE_MASK);
    }

    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

/// Run the secret-keys command
pub fn run_secret_keys(env: Option<&Path>, secret_keys: &[String]) -> Result<()> {
    let plain = read_string_map(env)?;
    validate_keys(
        plain
            .keys()
            .map(String::as_str)
            .chain(secret_keys.iter().map(String::as_str)),
    )?;
    let secret_keys: BTreeSet<String> = secret_keys.iter().cloned().collect();

    let inferred = infer_secret_keys(&plain, &secret_keys);
    println!("{}", serde_json::to_string_pretty(&inferred)?);
    Ok(())
}
