//! End-to-end flow: plan file and manifest -> connection readout -> variables
//!
//! Exercises the path a module takes at plan time: build the current
//! workspace from files, read its connections from a snapshot store, then
//! feed connection outputs into the variable engine.

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use serde_json::Value;
use wsconf_connect::{ConnectionReader, ResolveContext, SnapshotStore};
use wsconf_model::{ConnectionDeclaration, PlanConfig};
use wsconf_test_utils::files::TestFiles;
use wsconf_test_utils::topology::{self, CLUSTER_CONTRACT, LYCAN, RIKIMARU};
use wsconf_vars::ResolvedVariables;

const FACELESS_PLAN: &str = r#"{
    "orgName": "org0",
    "stackId": 100,
    "stackName": "stack0",
    "blockId": 101,
    "blockName": "faceless",
    "envId": 102,
    "envName": "env0"
}"#;

fn load_plan(files: &TestFiles, plan: &str) -> PlanConfig {
    PlanConfig::load(&files.plan(plan), PlanConfig::default()).unwrap()
}

fn outputs_as_strings(outputs: &BTreeMap<String, Value>) -> BTreeMap<String, String> {
    outputs
        .iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.to_uppercase(), text)
        })
        .collect()
}

#[test]
fn test_plan_file_to_connection_outputs() {
    let files = TestFiles::new();
    let plan = load_plan(&files, FACELESS_PLAN);
    let store = SnapshotStore::load(&files.store()).unwrap();

    let context = ResolveContext::from_plan(&plan);
    let reader = ConnectionReader::new(&store);

    let cluster = reader.read(
        &context,
        &ConnectionDeclaration::new("cluster").with_contract(CLUSTER_CONTRACT),
    );
    assert!(cluster.diagnostics.is_empty(), "{:?}", cluster.diagnostics);
    assert_eq!(cluster.workspace_id, topology::workspace(LYCAN).id());
    assert_eq!(cluster.id, "cluster-100/103/102");

    let network = reader.read(
        &context,
        &ConnectionDeclaration::new("network")
            .with_contract("network/*/*")
            .via("cluster"),
    );
    assert!(network.diagnostics.is_empty(), "{:?}", network.diagnostics);
    assert_eq!(network.workspace_id, topology::workspace(RIKIMARU).id());
    assert_eq!(network.outputs["placeholder"], "value");
}

#[test]
fn test_manifest_override_redirects_connection() {
    let files = TestFiles::new();
    let mut plan = load_plan(&files, FACELESS_PLAN);
    let manifest = files.write(
        "workspace.yml",
        "connections:\n  cluster:\n    stackId: 100\n    blockId: 105\n",
    );
    plan.apply_overrides_file(&manifest).unwrap();

    let store = SnapshotStore::load(&files.store()).unwrap();
    let readout = ConnectionReader::new(&store).read(
        &ResolveContext::from_plan(&plan),
        &ConnectionDeclaration::new("cluster"),
    );

    assert!(readout.diagnostics.is_empty(), "{:?}", readout.diagnostics);
    assert_eq!(readout.workspace_id, "100/105/102");
    assert_eq!(readout.outputs["placeholder"], "value");
}

#[test]
fn test_connection_outputs_feed_interpolation() {
    let files = TestFiles::new();
    let plan = load_plan(&files, FACELESS_PLAN);
    let store = SnapshotStore::load(&files.store()).unwrap();

    let cluster = ConnectionReader::new(&store).read(
        &ResolveContext::from_plan(&plan),
        &ConnectionDeclaration::new("cluster"),
    );

    let mut plain = outputs_as_strings(&cluster.outputs);
    plain.insert("GREETING".to_string(), "{{ TEST1 }} and {{ API_KEY }}".to_string());
    let secrets = BTreeMap::from([("API_KEY".to_string(), "s3cr3t".to_string())]);

    let resolved = ResolvedVariables::resolve(&plain, &secrets);

    assert_eq!(resolved.env_variables["TEST1"], "value1");
    assert_eq!(resolved.env_variables["TEST2"], "2");
    assert_eq!(resolved.secrets["GREETING"], "value1 and s3cr3t");
    assert!(!resolved.env_variables.contains_key("GREETING"));
    assert_eq!(resolved.secret_keys, vec!["API_KEY", "GREETING"]);
}

#[test]
fn test_missing_required_connection_is_reported_not_fatal() {
    let files = TestFiles::new();
    let plan = load_plan(&files, r#"{ "stackId": 100, "blockId": 106, "envId": 102 }"#);
    let store = SnapshotStore::load(&files.store()).unwrap();
    let reader = ConnectionReader::new(&store);
    let context = ResolveContext::from_plan(&plan);

    let required = reader.read(&context, &ConnectionDeclaration::new("cluster"));
    assert!(required.has_errors());
    assert_eq!(required.workspace_id, "");
    assert!(required.outputs.is_empty());

    let optional = reader.read(&context, &ConnectionDeclaration::new("cluster").optional());
    assert!(!optional.has_errors());
    assert!(optional.diagnostics.is_empty());
}
