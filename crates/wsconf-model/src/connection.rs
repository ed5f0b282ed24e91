//! Connection declarations and records
//!
//! A [`ConnectionDeclaration`] is what a module asks for: a named slot, the
//! contract (or legacy type) that must satisfy it, whether it is optional, and
//! an optional `via` chain. A [`ConnectionRecord`] is what a workspace's run
//! configuration knows about that slot, including the effective target it
//! currently points at.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::Contract;
use crate::error::{Error, Result};
use crate::workspace::ConnectionTarget;

/// Separates hops in a `via` chain (`app/cluster`).
pub const VIA_DELIMITER: char = '/';

static CONNECTION_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[_a-z0-9/-]+$").unwrap());

/// Check that a connection name only uses `a-z`, `0-9`, `-`, `_` and `/`.
pub fn validate_connection_name(name: &str) -> Result<()> {
    if CONNECTION_NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(Error::InvalidConnectionName {
            name: name.to_string(),
        })
    }
}

/// A named connection slot declared by a module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDeclaration {
    pub name: String,

    /// Contract selector the target must satisfy (`network/aws/vpc`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<String>,

    /// Legacy free-text type, used when the record predates contracts.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<String>,

    #[serde(default)]
    pub optional: bool,

    /// Connections to traverse first, separated by `/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
}

impl ConnectionDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_contract(mut self, contract: impl Into<String>) -> Self {
        self.contract = Some(contract.into());
        self
    }

    pub fn with_type(mut self, connection_type: impl Into<String>) -> Self {
        self.connection_type = Some(connection_type.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn via(mut self, via: impl Into<String>) -> Self {
        self.via = Some(via.into());
        self
    }

    /// The `via` chain split into hops, in traversal order.
    ///
    /// Empty tokens (`a//b`, a trailing `/`) are dropped.
    pub fn via_hops(&self) -> Vec<&str> {
        self.via
            .as_deref()
            .map(|via| {
                via.split(VIA_DELIMITER)
                    .map(str::trim)
                    .filter(|hop| !hop.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Parse the declaration's compatibility requirement.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedContract`] if the contract does not parse.
    pub fn requirement(&self) -> Result<Requirement> {
        let contract = match self.contract.as_deref().map(str::trim) {
            Some(contract) if !contract.is_empty() => Some(Contract::parse(contract)?),
            _ => None,
        };
        let connection_type = self
            .connection_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Ok(Requirement {
            contract,
            connection_type,
        })
    }
}

/// What a caller wants a resolved connection to satisfy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirement {
    pub contract: Option<Contract>,
    pub connection_type: Option<String>,
}

impl Requirement {
    pub fn contract(contract: Contract) -> Self {
        Self {
            contract: Some(contract),
            connection_type: None,
        }
    }

    pub fn connection_type(connection_type: impl Into<String>) -> Self {
        Self {
            contract: None,
            connection_type: Some(connection_type.into()),
        }
    }
}

/// A connection as recorded in a workspace's run configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
    /// Contract selector; empty for records that predate contracts.
    #[serde(default)]
    pub contract: String,

    /// Legacy type string.
    #[serde(default, rename = "type")]
    pub connection_type: String,

    #[serde(default)]
    pub optional: bool,

    /// The human-authored, relative target expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_target: Option<ConnectionTarget>,

    /// The concrete target the connection currently resolves to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_target: Option<ConnectionTarget>,

    #[serde(default)]
    pub unused: bool,
}

impl ConnectionRecord {
    pub fn with_contract(contract: impl Into<String>) -> Self {
        Self {
            contract: contract.into(),
            ..Self::default()
        }
    }

    pub fn with_type(connection_type: impl Into<String>) -> Self {
        Self {
            connection_type: connection_type.into(),
            ..Self::default()
        }
    }

    pub fn targeting(mut self, target: ConnectionTarget) -> Self {
        self.effective_target = Some(target);
        self
    }
}

/// Connection records keyed by connection name.
pub type Connections = BTreeMap<String, ConnectionRecord>;

/// Which connection set of a run configuration applies to a reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionScope {
    /// The workspace-level connections (apps and plain blocks).
    #[default]
    Workspace,
    /// The connections of one capability attached to the workspace.
    Capability(i64),
}

/// Connections declared by a capability attached to a workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityConfig {
    pub id: i64,
    #[serde(default)]
    pub connections: Connections,
}

/// The latest run configuration of a workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_uid: Option<Uuid>,
    #[serde(default)]
    pub connections: Connections,
    #[serde(default)]
    pub capabilities: Vec<CapabilityConfig>,
}

impl RunConfig {
    /// Select the connection set for `scope`.
    ///
    /// A capability that is not attached yields an empty set, not an error.
    pub fn connections_for(&self, scope: ConnectionScope) -> Connections {
        match scope {
            ConnectionScope::Workspace => self.connections.clone(),
            ConnectionScope::Capability(id) => self
                .capabilities
                .iter()
                .find(|capability| capability.id == id)
                .map(|capability| capability.connections.clone())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn via_hops_split_on_slash() {
        let decl = ConnectionDeclaration::new("network").via("app/cluster");
        assert_eq!(decl.via_hops(), vec!["app", "cluster"]);
    }

    #[test]
    fn via_hops_skip_empty_tokens() {
        let decl = ConnectionDeclaration::new("network").via("/app//cluster/");
        assert_eq!(decl.via_hops(), vec!["app", "cluster"]);
        assert!(ConnectionDeclaration::new("network").via("").via_hops().is_empty());
        assert!(ConnectionDeclaration::new("network").via_hops().is_empty());
    }

    #[test]
    fn requirement_parses_contract() {
        let req = ConnectionDeclaration::new("cluster")
            .with_contract("cluster/aws/ecs")
            .requirement()
            .unwrap();
        assert_eq!(req.contract.unwrap().to_string(), "cluster/aws/ecs");
        assert!(req.connection_type.is_none());
    }

    #[test]
    fn requirement_rejects_malformed_contract() {
        let err = ConnectionDeclaration::new("cluster")
            .with_contract("cluster//ecs")
            .requirement()
            .unwrap_err();
        assert!(matches!(err, Error::MalformedContract { .. }));
    }

    #[test]
    fn blank_contract_and_type_mean_no_requirement() {
        let req = ConnectionDeclaration::new("cluster")
            .with_contract(" ")
            .with_type("")
            .requirement()
            .unwrap();
        assert_eq!(req, Requirement::default());
    }

    #[test]
    fn missing_capability_has_no_connections() {
        let mut run_config = RunConfig::default();
        run_config
            .connections
            .insert("cluster".into(), ConnectionRecord::with_contract("cluster/aws/ecs"));
        run_config.capabilities.push(CapabilityConfig {
            id: 7,
            connections: Connections::from([(
                "subdomain".to_string(),
                ConnectionRecord::with_contract("subdomain/aws/route53"),
            )]),
        });

        let workspace = run_config.connections_for(ConnectionScope::Workspace);
        assert!(workspace.contains_key("cluster"));

        let capability = run_config.connections_for(ConnectionScope::Capability(7));
        assert!(capability.contains_key("subdomain"));
        assert!(!capability.contains_key("cluster"));

        assert!(run_config.connections_for(ConnectionScope::Capability(8)).is_empty());
    }

    #[test]
    fn run_config_deserializes_camel_case() {
        let json = r#"{
            "connections": {
                "cluster": {
                    "type": "cluster/aws-fargate",
                    "contract": "cluster/aws/ecs",
                    "desiredTarget": { "blockName": "lycan" },
                    "effectiveTarget": { "stackId": 100, "blockId": 103 }
                },
                "postgres": { "contract": "datastore/aws/postgres:rds", "optional": true }
            }
        }"#;
        let run_config: RunConfig = serde_json::from_str(json).unwrap();

        let cluster = &run_config.connections["cluster"];
        assert!(cluster.effective_target.is_some());
        assert_eq!(cluster.connection_type, "cluster/aws-fargate");
        assert_eq!(cluster.effective_target, Some(ConnectionTarget::block(100, 103)));

        let postgres = &run_config.connections["postgres"];
        assert!(postgres.effective_target.is_none());
        assert!(postgres.optional);
    }
}
