//! Variable key checks and secret-key inference

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::env_vars::references;
use crate::error::Error;
use crate::hash;

static VALID_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Check every key, reporting each invalid one.
pub fn validate_keys<'a, I>(keys: I) -> std::result::Result<(), Vec<Error>>
where
    I: IntoIterator<Item = &'a str>,
{
    let problems: Vec<Error> = keys
        .into_iter()
        .filter(|key| !VALID_KEY.is_match(key))
        .map(|key| Error::InvalidKey {
            key: key.to_string(),
        })
        .collect();

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

/// Secret keys known before any values are available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InferredSecretKeys {
    /// Sorted and unique.
    pub secret_keys: Vec<String>,
    /// Keys-only digest over `secret_keys`.
    pub hash: String,
}

/// Infer which keys will end up secret, given only the secret key names.
///
/// A plain key is secret if its value references one of `secret_keys`. Only
/// direct references count; values are not interpolated.
pub fn infer_secret_keys(
    plain: &BTreeMap<String, String>,
    secret_keys: &BTreeSet<String>,
) -> InferredSecretKeys {
    let mut inferred = secret_keys.clone();
    for (key, value) in plain {
        if secret_keys.iter().any(|secret| references(value, secret)) {
            tracing::debug!(key = %key, "Inferred secret key from reference");
            inferred.insert(key.clone());
        }
    }

    let hash = hash::keys_hash(inferred.iter().map(|key| (key.as_str(), true)));
    InferredSecretKeys {
        secret_keys: inferred.into_iter().collect(),
        hash,
    }
}
