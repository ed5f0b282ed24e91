//! A fixture stack of connected workspaces.
//!
//! Every workspace lives in stack `stack0` (100) and environment `env0` (102):
//!
//! ```text
//! enigma (107) --app--> faceless (101) --cluster--> lycan (103) --network--> rikimaru (105)
//! techies (106)  (cluster declared, never configured)
//! ```
//!
//! `faceless` also declares an optional `postgres` connection that has no
//! target. Outputs exist for `faceless`, `lycan` and `rikimaru`.

use serde_json::json;
use uuid::Uuid;
use wsconf_connect::{Outputs, ResolveContext, SnapshotStore};
use wsconf_model::{
    ConnectionRecord, ConnectionTarget, Connections, RunConfig, Workspace, WorkspaceTarget,
};

pub const ORG_NAME: &str = "org0";
pub const STACK_ID: i64 = 100;
pub const STACK_NAME: &str = "stack0";
pub const ENV_ID: i64 = 102;
pub const ENV_NAME: &str = "env0";

pub const FACELESS: i64 = 101;
pub const LYCAN: i64 = 103;
pub const RIKIMARU: i64 = 105;
pub const TECHIES: i64 = 106;
pub const ENIGMA: i64 = 107;

pub const CLUSTER_CONTRACT: &str = "cluster/aws/ecs";
pub const CLUSTER_TYPE: &str = "cluster/aws-fargate";
pub const NETWORK_CONTRACT: &str = "network/aws/vpc";
pub const NETWORK_TYPE: &str = "network/aws";
pub const APP_CONTRACT: &str = "app/aws/ecs";

fn block_name(block_id: i64) -> &'static str {
    match block_id {
        FACELESS => "faceless",
        LYCAN => "lycan",
        RIKIMARU => "rikimaru",
        TECHIES => "techies",
        ENIGMA => "enigma",
        _ => "",
    }
}

/// Stable uid of a fixture workspace.
pub fn uid(block_id: i64) -> Uuid {
    Uuid::from_u128(0x5e5e_0000_0000_0000_0000_0000_0000_0000 | block_id as u128)
}

/// Target of a fixture workspace, with names.
pub fn workspace(block_id: i64) -> WorkspaceTarget {
    WorkspaceTarget::new(STACK_ID, block_id, ENV_ID).with_names(
        STACK_NAME,
        block_name(block_id),
        ENV_NAME,
    )
}

/// Resolution context rooted at a fixture workspace.
pub fn context(block_id: i64) -> ResolveContext {
    ResolveContext::new(workspace(block_id))
}

fn record(contract: &str, connection_type: &str, target: Option<i64>) -> ConnectionRecord {
    let mut record = ConnectionRecord::with_contract(contract);
    record.connection_type = connection_type.to_string();
    if let Some(block_id) = target {
        let target =
            ConnectionTarget::block(STACK_ID, block_id).with_block_name(block_name(block_id));
        record = record.targeting(target);
    }
    record
}

fn entry(block_id: i64, connections: Connections) -> (Workspace, RunConfig) {
    let workspace = Workspace {
        uid: uid(block_id),
        org_name: ORG_NAME.to_string(),
        stack_id: STACK_ID,
        stack_name: STACK_NAME.to_string(),
        block_id,
        block_name: block_name(block_id).to_string(),
        env_id: ENV_ID,
        env_name: ENV_NAME.to_string(),
    };
    let run_config = RunConfig {
        workspace_uid: Some(workspace.uid),
        connections,
        capabilities: Vec::new(),
    };
    (workspace, run_config)
}

fn outputs(value: serde_json::Value) -> Outputs {
    match value {
        serde_json::Value::Object(map) => map.into_iter().collect(),
        _ => Outputs::new(),
    }
}

/// The fixture stack as a snapshot store.
pub fn topology() -> SnapshotStore {
    let mut postgres = ConnectionRecord::with_contract("datastore/aws/postgres:rds");
    postgres.optional = true;

    let workspaces = [
        entry(
            FACELESS,
            Connections::from([
                ("cluster".to_string(), record(CLUSTER_CONTRACT, CLUSTER_TYPE, Some(LYCAN))),
                ("postgres".to_string(), postgres),
            ]),
        ),
        entry(
            LYCAN,
            Connections::from([(
                "network".to_string(),
                record(NETWORK_CONTRACT, NETWORK_TYPE, Some(RIKIMARU)),
            )]),
        ),
        entry(RIKIMARU, Connections::new()),
        entry(
            TECHIES,
            Connections::from([(
                "cluster".to_string(),
                record(CLUSTER_CONTRACT, CLUSTER_TYPE, None),
            )]),
        ),
        entry(
            ENIGMA,
            Connections::from([("app".to_string(), record(APP_CONTRACT, "", Some(FACELESS)))]),
        ),
    ];

    workspaces
        .into_iter()
        .fold(SnapshotStore::new(), |store, (workspace, run_config)| {
            store.with_workspace(workspace, run_config)
        })
        .with_outputs(uid(FACELESS), outputs(json!({ "service_name": "faceless" })))
        .with_outputs(
            uid(LYCAN),
            outputs(json!({
                "test1": "value1",
                "test2": 2,
                "test3": { "key1": "value1", "key2": "value2", "key3": "value3" }
            })),
        )
        .with_outputs(uid(RIKIMARU), outputs(json!({ "placeholder": "value" })))
}

/// The fixture stack serialized as a snapshot store document.
pub fn topology_json() -> String {
    serde_json::to_string_pretty(&topology())
        .unwrap_or_else(|e| panic!("topology_json: failed to serialize store: {e}"))
}
