//! Module contract selectors
//!
//! A contract names the capability a module provides as
//! `category/provider/platform`, for example `network/aws/vpc`. Any segment
//! may be the wildcard `*`, and a segment may carry a `:` qualifier
//! (`datastore/aws/postgres:rds`).
//!
//! Matching is segment-wise and segment-count-aware: a selector only matches a
//! subject with the same number of segments.
//!
//! ```
//! use wsconf_model::Contract;
//!
//! let selector: Contract = "network/*/*".parse().unwrap();
//! assert!(selector.matches(&"network/aws/vpc".parse().unwrap()));
//! assert!(!selector.matches(&"cluster/aws/ecs".parse().unwrap()));
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Matches any segment (or any qualifier).
pub const WILDCARD: &str = "*";

const SEGMENT_DELIMITER: char = '/';
const QUALIFIER_DELIMITER: char = ':';

static SEGMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\*|[A-Za-z0-9_.-]+)(:(\*|[A-Za-z0-9_.-]+))?$").unwrap()
});

/// A parsed contract, usable both as a selector and as a subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Contract {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Segment {
    name: String,
    qualifier: Option<String>,
}

impl Segment {
    fn matches(&self, subject: &Segment) -> bool {
        if self.name == WILDCARD {
            return true;
        }
        if self.name != subject.name {
            return false;
        }
        match (&self.qualifier, &subject.qualifier) {
            (None, None) => true,
            (Some(wanted), _) if wanted == WILDCARD => true,
            (Some(wanted), Some(actual)) => wanted == actual,
            _ => false,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(qualifier) => write!(f, "{}{}{}", self.name, QUALIFIER_DELIMITER, qualifier),
            None => write!(f, "{}", self.name),
        }
    }
}

impl Contract {
    /// Parse a contract string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedContract`] for an empty string, an empty
    /// segment (`network//vpc`) or a segment with characters outside
    /// `[A-Za-z0-9_.-]` / `*`.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(malformed(input, "contract is empty"));
        }

        let mut segments = Vec::new();
        for (index, raw) in trimmed.split(SEGMENT_DELIMITER).enumerate() {
            let captures = SEGMENT_PATTERN.captures(raw).ok_or_else(|| {
                malformed(input, &format!("segment {} ('{}') is invalid", index + 1, raw))
            })?;
            segments.push(Segment {
                name: captures[1].to_string(),
                qualifier: captures.get(3).map(|m| m.as_str().to_string()),
            });
        }

        Ok(Self { segments })
    }

    /// Number of `/`-separated segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Treat `self` as a selector and test it against `subject`.
    ///
    /// Wildcards are only honoured on the selector side.
    pub fn matches(&self, subject: &Contract) -> bool {
        self.segments.len() == subject.segments.len()
            && self
                .segments
                .iter()
                .zip(&subject.segments)
                .all(|(selector, actual)| selector.matches(actual))
    }
}

impl FromStr for Contract {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Contract::parse(s)
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                write!(f, "{}", SEGMENT_DELIMITER)?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

fn malformed(contract: &str, reason: &str) -> Error {
    Error::MalformedContract {
        contract: contract.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_the_input() {
        let contract = Contract::parse("datastore/aws/postgres:rds").unwrap();
        assert_eq!(contract.to_string(), "datastore/aws/postgres:rds");
        assert_eq!(contract.len(), 3);
    }

    #[test]
    fn whitespace_around_contract_is_ignored() {
        let contract = Contract::parse("  network/aws/vpc ").unwrap();
        assert_eq!(contract.to_string(), "network/aws/vpc");
    }

    #[test]
    fn empty_contract_is_malformed() {
        let err = Contract::parse("   ").unwrap_err();
        assert!(matches!(err, Error::MalformedContract { .. }));
    }

    #[test]
    fn error_names_the_bad_segment() {
        let err = Contract::parse("network//vpc").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("network//vpc"), "got: {message}");
        assert!(message.contains("segment 2"), "got: {message}");
    }

    #[test]
    fn qualifier_wildcard_matches_any_qualifier() {
        let selector = Contract::parse("datastore/aws/postgres:*").unwrap();
        assert!(selector.matches(&Contract::parse("datastore/aws/postgres:rds").unwrap()));
        assert!(!selector.matches(&Contract::parse("datastore/aws/mysql:rds").unwrap()));
    }
}
