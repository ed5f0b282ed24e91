use pretty_assertions::assert_eq;
use serde_json::json;
use wsconf_connect::{ConnectionReader, Severity};
use wsconf_model::ConnectionDeclaration;
use wsconf_test_utils::stores::RecordingStore;
use wsconf_test_utils::topology::*;

fn cluster() -> ConnectionDeclaration {
    ConnectionDeclaration::new("cluster").with_contract(CLUSTER_CONTRACT)
}

#[test]
fn reads_target_and_outputs() {
    let store = topology();
    let readout = ConnectionReader::new(&store).read(&context(FACELESS), &cluster());

    assert_eq!(readout.diagnostics, vec![]);
    assert_eq!(readout.workspace_id, "100/103/102");
    assert_eq!(readout.id, "cluster-100/103/102");
    assert_eq!(readout.contract, CLUSTER_CONTRACT);
    assert_eq!(readout.outputs["test1"], json!("value1"));
    assert_eq!(readout.outputs["test2"], json!(2));
    assert_eq!(readout.outputs["test3"]["key2"], json!("value2"));
}

#[test]
fn reads_outputs_through_via_chain() {
    let store = topology();
    let declaration = ConnectionDeclaration::new("network")
        .with_contract(NETWORK_CONTRACT)
        .via("cluster");
    let readout = ConnectionReader::new(&store).read(&context(FACELESS), &declaration);

    assert!(!readout.has_errors());
    assert_eq!(readout.via, "cluster");
    assert_eq!(readout.outputs["placeholder"], json!("value"));
}

#[test]
fn missing_required_connection_is_an_error_diagnostic() {
    let store = topology();
    let readout = ConnectionReader::new(&store).read(&context(TECHIES), &cluster());

    assert!(readout.has_errors());
    assert_eq!(readout.workspace_id, "");
    assert_eq!(readout.id, "cluster-");
    assert_eq!(
        readout.diagnostics[0].summary,
        r#"The connection "cluster" is missing. It is required to use this plan."#
    );
}

#[test]
fn missing_optional_connection_is_silent() {
    let store = topology();
    let readout = ConnectionReader::new(&store).read(&context(TECHIES), &cluster().optional());

    assert_eq!(readout.diagnostics, vec![]);
    assert!(readout.outputs.is_empty());
}

#[test]
fn via_not_found_is_treated_as_unsatisfied() {
    let store = topology();
    let network = ConnectionDeclaration::new("network").via("cluster");

    let reader = ConnectionReader::new(&store);
    let optional = reader.read(&context(TECHIES), &network.clone().optional());
    assert_eq!(optional.diagnostics, vec![]);

    let required = reader.read(&context(TECHIES), &network);
    assert_eq!(required.diagnostics.len(), 1);
    assert!(required.diagnostics[0].summary.contains("is missing"));
}

#[test]
fn resolver_errors_become_unable_to_find_workspace() {
    let store = topology();
    let declaration = ConnectionDeclaration::new("cluster").with_contract("cluster/gcp/gke");
    let readout = ConnectionReader::new(&store).read(&context(FACELESS), &declaration);

    assert_eq!(readout.diagnostics.len(), 1);
    let diagnostic = &readout.diagnostics[0];
    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!(diagnostic.summary, "Unable to find workspace.");
    assert!(diagnostic.detail.as_deref().unwrap().contains("wanted=cluster/gcp/gke"));
}

#[test]
fn invalid_name_is_reported_without_fetching() {
    let store = RecordingStore::new(topology());
    let declaration = ConnectionDeclaration::new("Bad Name");
    let readout = ConnectionReader::new(&store).read(&context(FACELESS), &declaration);

    assert!(readout.has_errors());
    assert_eq!(readout.diagnostics.len(), 1);
    assert!(readout.diagnostics[0].summary.starts_with("Invalid connection name"));
    assert!(readout.diagnostics[0].summary.contains("Bad Name"));
    assert!(readout.diagnostics[0].detail.is_none());
    assert_eq!(store.total_calls(), 0);
}

#[test]
fn workspace_lookup_failure_is_an_error_diagnostic() {
    let store = RecordingStore::new(topology()).failing_workspace();
    let readout = ConnectionReader::new(&store).read(&context(FACELESS), &cluster());

    assert!(readout.has_errors());
    assert_eq!(readout.workspace_id, "100/103/102");
    assert_eq!(readout.diagnostics[0].summary, "Unable to find workspace 100/103/102");
    assert_eq!(store.outputs_calls(), 0);
}

#[test]
fn outputs_failure_is_a_warning_with_empty_outputs() {
    let store = RecordingStore::new(topology()).failing_outputs();
    let readout = ConnectionReader::new(&store).read(&context(FACELESS), &cluster());

    assert!(!readout.has_errors());
    assert!(readout.outputs.is_empty());
    assert_eq!(readout.diagnostics.len(), 1);
    assert_eq!(readout.diagnostics[0].severity, Severity::Warning);
    assert!(readout.diagnostics[0].summary.contains("'outputs' will be empty"));
    assert!(readout.diagnostics[0].detail.as_deref().unwrap().contains("unavailable"));
}

#[test]
fn readout_serializes_type_and_workspace_fields() {
    let store = topology();
    let declaration = cluster().with_type(CLUSTER_TYPE);
    let readout = ConnectionReader::new(&store).read(&context(FACELESS), &declaration);

    let value = serde_json::to_value(&readout).unwrap();
    assert_eq!(value["type"], json!(CLUSTER_TYPE));
    assert_eq!(value["workspace_id"], json!("100/103/102"));
    assert_eq!(value["diagnostics"], json!([]));
}
