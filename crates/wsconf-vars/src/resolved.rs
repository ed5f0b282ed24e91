//! The resolved variable bundle handed back to callers

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::env_vars::EnvVars;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVariables {
    pub env_variables: BTreeMap<String, String>,
    pub secrets: BTreeMap<String, String>,
    pub secret_refs: BTreeMap<String, String>,
    pub secret_keys: Vec<String>,
    pub hash: String,
    pub keys_hash: String,
}

impl ResolvedVariables {
    /// Interpolate `plain` and `secrets` and collect every view.
    pub fn resolve(plain: &BTreeMap<String, String>, secrets: &BTreeMap<String, String>) -> Self {
        let mut vars = EnvVars::new(plain, secrets);
        vars.interpolate();
        Self::from(&vars)
    }

    /// Replace every secret value with `mask`, keeping keys and digests.
    pub fn masked(mut self, mask: &str) -> Self {
        for value in self.secrets.values_mut() {
            *value = mask.to_string();
        }
        self
    }
}

impl From<&EnvVars> for ResolvedVariables {
    fn from(vars: &EnvVars) -> Self {
        Self {
            env_variables: vars.env_vars(),
            secrets: vars.secrets(),
            secret_refs: vars.secret_refs(),
            secret_keys: vars.secret_keys(),
            hash: vars.hash(),
            keys_hash: vars.keys_hash(),
        }
    }
}
