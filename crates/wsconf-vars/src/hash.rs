//! Content identity of a variable set
//!
//! Two digests are derived from the same ordered entries:
//!
//! - the value digest over `"{name}={value}{+};"` per entry
//! - the keys digest over `"{name}{+};"` per entry
//!
//! where `+` marks a sensitive entry. Both are SHA-256, rendered as lowercase
//! hex. Callers compare digests to detect "nothing changed".

use sha2::{Digest, Sha256};

const SENSITIVE_MARKER: &str = "+";

/// SHA-256 of `input` as lowercase hex.
pub fn digest(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Value digest over `(name, value, sensitive)` entries, in the given order.
pub fn hash<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str, bool)>,
{
    let mut input = String::new();
    for (name, value, sensitive) in entries {
        input.push_str(name);
        input.push('=');
        input.push_str(value);
        if sensitive {
            input.push_str(SENSITIVE_MARKER);
        }
        input.push(';');
    }
    digest(&input)
}

/// Keys-only digest over `(name, sensitive)` entries, in the given order.
pub fn keys_hash<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    let mut input = String::new();
    for (name, sensitive) in entries {
        input.push_str(name);
        if sensitive {
            input.push_str(SENSITIVE_MARKER);
        }
        input.push(';');
    }
    digest(&input)
}
