//! Connection graph resolution
//!
//! [`ConnectionResolver::resolve`] answers "which workspace satisfies this
//! connection?" for the workspace in a [`ResolveContext`]:
//!
//! 1. A local override for the connection name wins outright; no fetch is
//!    made.
//! 2. Otherwise the source workspace's run configuration is fetched and the
//!    connection set for the context's scope is selected.
//! 3. Each `via` hop is followed left to right. A hop is looked up in the
//!    working connection set, the working workspace moves to the hop's target
//!    and the working set becomes that workspace's own connections.
//! 4. The connection is looked up in the final set. A missing record, or one
//!    without an effective target, is unsatisfied (`Ok(None)`).
//! 5. The record is checked against the declaration's contract or type and
//!    its effective target is resolved relative to the working workspace.

use tracing::debug;
use wsconf_model::{
    ConnectionDeclaration, ConnectionRecord, ConnectionScope, Connections, Contract,
    LocalOverrides, PlanConfig, Requirement, WorkspaceTarget, validate_connection_name,
};

use crate::error::{Error, FetchOperation, Result};
use crate::source::RunConfigSource;

/// The explicit "current workspace" a resolution runs against.
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    pub workspace: WorkspaceTarget,
    /// Hand-authored targets for `workspace` only.
    pub overrides: LocalOverrides,
    pub scope: ConnectionScope,
}

impl ResolveContext {
    pub fn new(workspace: WorkspaceTarget) -> Self {
        Self {
            workspace,
            ..Self::default()
        }
    }

    pub fn with_overrides(mut self, overrides: LocalOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_scope(mut self, scope: ConnectionScope) -> Self {
        self.scope = scope;
        self
    }

    /// Context for a plan: its workspace, overrides and capability scope.
    pub fn from_plan(plan: &PlanConfig) -> Self {
        Self {
            workspace: plan.workspace_target(),
            overrides: plan.connections.clone(),
            scope: plan.connection_scope(),
        }
    }
}

/// Resolves connection declarations to target workspaces.
pub struct ConnectionResolver<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S: RunConfigSource + ?Sized> ConnectionResolver<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Resolve `declaration` from the context's workspace.
    ///
    /// Returns `Ok(None)` when the connection is unsatisfied.
    ///
    /// # Errors
    ///
    /// - [`Error::Model`] for an invalid name or a malformed contract, raised
    ///   before any fetch
    /// - [`Error::ViaConnectionNotFound`] when a `via` hop cannot be resolved
    /// - [`Error::ContractMismatch`] / [`Error::TypeMismatch`] when the record
    ///   does not satisfy the declaration
    /// - [`Error::Fetch`] when a run configuration cannot be retrieved
    pub fn resolve(
        &self,
        context: &ResolveContext,
        declaration: &ConnectionDeclaration,
    ) -> Result<Option<WorkspaceTarget>> {
        let name = declaration.name.as_str();
        validate_connection_name(name)?;
        let requirement = declaration.requirement()?;

        debug!(
            name,
            via = declaration.via.as_deref().unwrap_or_default(),
            scope = ?context.scope,
            "Resolving connection from {}",
            context.workspace.id()
        );

        if let Some(target) = context.overrides.get(name) {
            let found = context.workspace.find_relative(target);
            debug!(name, "Found workspace in local overrides @ {}", found.id());
            return Ok(Some(found));
        }

        let mut working = context.workspace.clone();
        let mut connections = self.connections(&working, context.scope)?;

        for (index, hop) in declaration.via_hops().into_iter().enumerate() {
            let next = self
                .find_hop(context, &working, &connections, hop)
                .ok_or_else(|| Error::ViaConnectionNotFound {
                    workspace: working.id(),
                    via: declaration.via.clone().unwrap_or_default(),
                    hop: hop.to_string(),
                    index,
                })?;

            debug!(via = hop, "Pulling connections for {}", next.id());
            connections = self.connections(&next, ConnectionScope::Workspace)?;
            working = next;
        }

        let Some((record, effective)) = connections
            .get(name)
            .and_then(|record| record.effective_target.as_ref().map(|t| (record, t)))
        else {
            debug!(name, "Connection was not found in {}", working.id());
            return Ok(None);
        };

        check_compatibility(name, record, &requirement)?;

        let found = working.find_relative(effective);
        debug!(name, "Found workspace in connections @ {}", found.id());
        Ok(Some(found))
    }

    fn connections(&self, target: &WorkspaceTarget, scope: ConnectionScope) -> Result<Connections> {
        debug!(scope = ?scope, "Pulling workspace run config for @ {}", target.id());
        let run_config = self
            .source
            .run_config(target)
            .map_err(|e| Error::fetch(FetchOperation::RunConfig, target, e))?;
        Ok(run_config.connections_for(scope))
    }

    /// Locate the workspace behind one `via` hop.
    ///
    /// Overrides only describe the context's own workspace, so they are
    /// consulted only while the chain is still there.
    fn find_hop(
        &self,
        context: &ResolveContext,
        working: &WorkspaceTarget,
        connections: &Connections,
        hop: &str,
    ) -> Option<WorkspaceTarget> {
        if *working == context.workspace {
            if let Some(target) = context.overrides.get(hop) {
                return Some(working.find_relative(target));
            }
        }

        connections
            .get(hop)
            .and_then(|record| record.effective_target.as_ref())
            .map(|target| working.find_relative(target))
    }
}

/// Check a record against what the declaration asks for.
///
/// A record contract is a selector matched against the wanted contract. A
/// record without a contract falls back to exact type equality. A record
/// with neither is accepted as-is.
pub fn check_compatibility(
    connection: &str,
    record: &ConnectionRecord,
    requirement: &Requirement,
) -> Result<()> {
    let record_contract = record.contract.trim();
    if !record_contract.is_empty() {
        if let Some(wanted) = &requirement.contract {
            let selector = Contract::parse(record_contract)?;
            if !selector.matches(wanted) {
                return Err(Error::ContractMismatch {
                    connection: connection.to_string(),
                    wanted: wanted.to_string(),
                    actual: record_contract.to_string(),
                });
            }
            return Ok(());
        }
    }

    if !record.connection_type.is_empty() {
        if let Some(wanted) = &requirement.connection_type {
            if *wanted != record.connection_type {
                return Err(Error::TypeMismatch {
                    connection: connection.to_string(),
                    wanted: wanted.clone(),
                    actual: record.connection_type.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requirement(contract: &str) -> Requirement {
        Requirement::contract(Contract::parse(contract).unwrap())
    }

    #[test]
    fn wildcard_record_contract_accepts_concrete_want() {
        let record = ConnectionRecord::with_contract("cluster/*/*");
        assert!(check_compatibility("cluster", &record, &requirement("cluster/aws/ecs")).is_ok());
    }

    #[test]
    fn contract_mismatch_names_both_sides() {
        let record = ConnectionRecord::with_contract("network/aws/vpc");
        let err = check_compatibility("network", &record, &requirement("network/aws/rds"))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("wanted=network/aws/rds"), "got: {message}");
        assert!(message.contains("actual=network/aws/vpc"), "got: {message}");
    }

    #[test]
    fn legacy_type_requires_exact_equality() {
        let record = ConnectionRecord::with_type("cluster/aws-fargate");
        let wanted = Requirement::connection_type("cluster/aws-fargate");
        assert!(check_compatibility("cluster", &record, &wanted).is_ok());

        let wrong = Requirement::connection_type("cluster/aws-ec2");
        assert!(matches!(
            check_compatibility("cluster", &record, &wrong),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn record_without_contract_or_type_is_accepted() {
        let record = ConnectionRecord::default();
        assert!(check_compatibility("cluster", &record, &requirement("cluster/aws/ecs")).is_ok());
        let wanted = Requirement::connection_type("cluster/aws-fargate");
        assert!(check_compatibility("cluster", &record, &wanted).is_ok());
    }

    #[test]
    fn contract_record_falls_back_to_type_when_no_contract_wanted() {
        let mut record = ConnectionRecord::with_contract("cluster/aws/ecs");
        record.connection_type = "cluster/aws-fargate".into();

        let same = Requirement::connection_type("cluster/aws-fargate");
        assert!(check_compatibility("cluster", &record, &same).is_ok());

        let other = Requirement::connection_type("cluster/aws-ec2");
        assert!(check_compatibility("cluster", &record, &other).is_err());
    }

    #[test]
    fn context_from_plan_carries_scope_and_overrides() {
        let plan = PlanConfig {
            stack_id: 100,
            block_id: 101,
            env_id: 102,
            capability_id: 9,
            ..PlanConfig::default()
        }
        .with_override("cluster", wsconf_model::ConnectionTarget::block(100, 103));

        let context = ResolveContext::from_plan(&plan);
        assert_eq!(context.workspace.id(), "100/101/102");
        assert_eq!(context.scope, ConnectionScope::Capability(9));
        assert!(context.overrides.get("cluster").is_some());
    }
}
