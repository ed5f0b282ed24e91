//! Workspace identity command

use std::path::Path;

use serde_json::json;
use wsconf_model::ConnectionScope;

use crate::context::load_plan;
use crate::error::Result;

/// Run the workspace command
pub fn run_workspace(plan: Option<&Path>) -> Result<()> {
    let plan = load_plan(plan, None)?;
    let target = plan.workspace_target();

    let capability_id = match plan.connection_scope() {
        ConnectionScope::Capability(id) => Some(id),
        ConnectionScope::Workspace => None,
    };

    let identity = json!({
        "id": target.id(),
        "displayId": target.display_id(),
        "slashedName": target.slashed_name(),
        "hyphenatedName": target.hyphenated_name(),
        "tags": target.tags(),
        "orgName": plan.org_name,
        "workspaceUid": plan.workspace_uid,
        "capabilityId": capability_id,
        "connections": plan.connections,
    });

    println!("{}", serde_json::to_string_pretty(&identity)?);
    Ok(())
}
