//! Variable interpolation
//!
//! An [`EnvVars`] corpus holds plain and sensitive values that may reference
//! each other with `{{ NAME }}` tokens (whitespace inside the braces is
//! ignored). [`EnvVars::interpolate`] runs three ordered passes:
//!
//! 1. **Secret references.** A value containing `{{ secret(REF) }}` is tagged
//!    with `REF` verbatim. Tagged entries are terminal: they are neither
//!    substitution sources nor targets. A tagged sensitive entry still
//!    appears in the secret views.
//! 2. **Secret propagation.** Every secret substitutes into every other
//!    entry. A plain entry whose text changes becomes sensitive.
//! 3. **Plain propagation.** Every plain entry substitutes into every other
//!    entry. Nothing is reclassified.
//!
//! In passes 2 and 3 the set of sources is taken when the pass starts, and
//! each source contributes its value as it stands when its turn comes. An
//! entry promoted to secret during pass 2 is therefore not a pass-2 source in
//! the same call; a second call picks it up.
//!
//! Unknown tokens are left as literal text, and an entry never substitutes
//! into itself.
//!
//! ```
//! use wsconf_vars::EnvVars;
//!
//! let mut vars = EnvVars::default()
//!     .with_plain("DATABASE_URL", "{{ POSTGRES_URL }}")
//!     .with_secret("POSTGRES_URL", "postgres://x");
//! vars.interpolate();
//!
//! assert!(vars.env_vars().is_empty());
//! assert_eq!(vars.secrets()["DATABASE_URL"], "postgres://x");
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::hash;

static SECRET_REF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*secret\((.+)\)\s*\}\}").unwrap());

/// `{{ NAME }}`; group 1 is the name without surrounding whitespace.
static REFERENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([^{}]*?)\s*\}\}").unwrap());

/// Whether `text` contains a `{{ name }}` token.
pub fn references(text: &str, name: &str) -> bool {
    REFERENCE_PATTERN
        .captures_iter(text)
        .any(|captures| &captures[1] == name)
}

/// Replace every `{{ name }}` token in `text` with `value`, literally.
///
/// Returns `None` if the text is unchanged.
pub fn substitute(text: &str, name: &str, value: &str) -> Option<String> {
    let replaced = REFERENCE_PATTERN.replace_all(text, |captures: &Captures| {
        if &captures[1] == name {
            value.to_string()
        } else {
            captures[0].to_string()
        }
    });
    match replaced {
        Cow::Owned(replaced) if replaced != text => Some(replaced),
        _ => None,
    }
}

/// One named value in the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub value: String,
    /// Must never be exposed as plain output.
    #[serde(default)]
    pub is_sensitive: bool,
    /// External locator standing in for the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<String>,
}

impl EnvVar {
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn secret(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_sensitive: true,
            secret_ref: None,
        }
    }

    pub fn is_secret_ref(&self) -> bool {
        self.secret_ref.is_some()
    }

    /// Sensitive and resolved locally; only these feed secret propagation.
    pub fn is_secret(&self) -> bool {
        self.is_sensitive && !self.is_secret_ref()
    }

    pub fn is_plain(&self) -> bool {
        !self.is_sensitive && !self.is_secret_ref()
    }
}

/// The corpus of variables under resolution, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvVars {
    vars: BTreeMap<String, EnvVar>,
}

impl EnvVars {
    /// Build a corpus from plain values and secrets.
    ///
    /// A name present in both maps is a secret.
    pub fn new(plain: &BTreeMap<String, String>, secrets: &BTreeMap<String, String>) -> Self {
        let mut vars = BTreeMap::new();
        for (name, value) in plain {
            vars.insert(name.clone(), EnvVar::plain(value.as_str()));
        }
        for (name, value) in secrets {
            vars.insert(name.clone(), EnvVar::secret(value.as_str()));
        }
        Self { vars }
    }

    pub fn with_plain(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), EnvVar::plain(value));
        self
    }

    pub fn with_secret(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), EnvVar::secret(value));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, var: EnvVar) {
        self.vars.insert(name.into(), var);
    }

    pub fn get(&self, name: &str) -> Option<&EnvVar> {
        self.vars.get(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &EnvVar)> {
        self.vars.iter()
    }

    /// Resolve references in place. See the module docs for the passes.
    pub fn interpolate(&mut self) {
        let sensitive_before = self.count(|var| var.is_sensitive);

        let tagged = self.tag_secret_refs();
        self.propagate_secrets();
        self.propagate_plain();

        debug!(
            entries = self.vars.len(),
            secret_refs = tagged,
            promoted = self.count(|var| var.is_sensitive) - sensitive_before,
            "Interpolated variables"
        );
    }

    fn tag_secret_refs(&mut self) -> usize {
        let mut tagged = 0;
        for var in self.vars.values_mut() {
            if let Some(captures) = SECRET_REF_PATTERN.captures(&var.value) {
                var.secret_ref = Some(captures[1].to_string());
                tagged += 1;
            }
        }
        tagged
    }

    fn propagate_secrets(&mut self) {
        for source in self.names(EnvVar::is_secret) {
            self.substitute_from(&source, true);
        }
    }

    fn propagate_plain(&mut self) {
        for source in self.names(EnvVar::is_plain) {
            self.substitute_from(&source, false);
        }
    }

    /// Substitute `source`'s current value into every other untagged entry.
    fn substitute_from(&mut self, source: &str, promote: bool) {
        let Some(value) = self.vars.get(source).map(|var| var.value.clone()) else {
            return;
        };
        for (name, var) in self.vars.iter_mut() {
            if name == source || var.is_secret_ref() {
                continue;
            }
            if let Some(replaced) = substitute(&var.value, source, &value) {
                var.value = replaced;
                if promote && !var.is_sensitive {
                    debug!(name = %name, source, "Promoted to secret");
                    var.is_sensitive = true;
                }
            }
        }
    }

    fn names(&self, filter: impl Fn(&EnvVar) -> bool) -> Vec<String> {
        self.vars
            .iter()
            .filter(|(_, var)| filter(var))
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn count(&self, filter: impl Fn(&EnvVar) -> bool) -> usize {
        self.vars.values().filter(|var| filter(var)).count()
    }

    /// Plain entries: not sensitive and not a secret reference.
    pub fn env_vars(&self) -> BTreeMap<String, String> {
        self.view(EnvVar::is_plain, |var| var.value.clone())
    }

    /// Sensitive entries with their resolved text, including tagged ones.
    pub fn secrets(&self) -> BTreeMap<String, String> {
        self.view(|var| var.is_sensitive, |var| var.value.clone())
    }

    /// Tagged entries mapped to their reference.
    pub fn secret_refs(&self) -> BTreeMap<String, String> {
        self.view(EnvVar::is_secret_ref, |var| {
            var.secret_ref.clone().unwrap_or_default()
        })
    }

    /// Names of the entries in [`secrets`](Self::secrets), sorted.
    pub fn secret_keys(&self) -> Vec<String> {
        self.names(|var| var.is_sensitive)
    }

    /// Value digest over every entry.
    pub fn hash(&self) -> String {
        hash::hash(
            self.vars
                .iter()
                .map(|(name, var)| (name.as_str(), var.value.as_str(), var.is_sensitive)),
        )
    }

    /// Keys-only digest over every entry.
    pub fn keys_hash(&self) -> String {
        hash::keys_hash(
            self.vars
                .iter()
                .map(|(name, var)| (name.as_str(), var.is_sensitive)),
        )
    }

    fn view(
        &self,
        filter: impl Fn(&EnvVar) -> bool,
        value: impl Fn(&EnvVar) -> String,
    ) -> BTreeMap<String, String> {
        self.vars
            .iter()
            .filter(|(_, var)| filter(var))
            .map(|(name, var)| (name.clone(), value(var)))
            .collect()
    }
}
