use std::fs;

use pretty_assertions::assert_eq;
use tempfile::tempdir;
use wsconf_model::{ConnectionScope, ConnectionTarget, Error, PLAN_FILENAME, PlanConfig};

fn defaults() -> PlanConfig {
    PlanConfig {
        org_name: "org0".into(),
        stack_id: 100,
        stack_name: "stack0".into(),
        block_id: 101,
        block_name: "faceless".into(),
        env_id: 102,
        env_name: "env0".into(),
        ..PlanConfig::default()
    }
}

#[test]
fn missing_plan_file_keeps_defaults() {
    let dir = tempdir().unwrap();
    let plan = PlanConfig::load(&dir.path().join(PLAN_FILENAME), defaults()).unwrap();
    assert_eq!(plan, defaults());
}

#[test]
fn plan_file_overrides_individual_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(PLAN_FILENAME);
    fs::write(
        &path,
        r#"{
            "envId": 200,
            "envName": "prod",
            "capabilityId": 7,
            "connections": { "cluster": { "stackId": 100, "blockId": 110 } }
        }"#,
    )
    .unwrap();

    let plan = PlanConfig::load(&path, defaults()).unwrap();

    assert_eq!(plan.workspace_target().id(), "100/101/200");
    assert_eq!(plan.env_name, "prod");
    assert_eq!(plan.block_name, "faceless");
    assert_eq!(plan.connection_scope(), ConnectionScope::Capability(7));
    assert_eq!(
        plan.connections.get("cluster"),
        Some(&ConnectionTarget::block(100, 110))
    );
}

#[test]
fn malformed_plan_file_is_invalid_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(PLAN_FILENAME);
    fs::write(&path, "{ not json").unwrap();

    let err = PlanConfig::load(&path, defaults()).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig { .. }), "got {err:?}");
}

#[test]
fn manifest_overrides_win_over_plan_file_connections() {
    let dir = tempdir().unwrap();
    let manifest = dir.path().join("workspace.yml");
    fs::write(
        &manifest,
        "connections:\n  cluster:\n    stackId: 100\n    blockId: 103\n",
    )
    .unwrap();

    let mut plan = defaults()
        .with_override("cluster", ConnectionTarget::block(100, 110))
        .with_override("network", ConnectionTarget::block(100, 105));
    plan.apply_overrides_file(&manifest).unwrap();

    assert_eq!(
        plan.connections.get("cluster"),
        Some(&ConnectionTarget::block(100, 103))
    );
    assert_eq!(
        plan.connections.get("network"),
        Some(&ConnectionTarget::block(100, 105))
    );
}

#[test]
fn missing_manifest_is_ignored() {
    let dir = tempdir().unwrap();
    let mut plan = defaults();
    plan.apply_overrides_file(&dir.path().join("absent.yml")).unwrap();
    assert!(plan.connections.is_empty());
}
