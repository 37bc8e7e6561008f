mod common;

use assert_cmd::prelude::*;
use common::{MockState, start_mock_service, write_cli_config};
use std::collections::VecDeque;
use std::process::Command;
use std::sync::Mutex;
use tempfile::TempDir;

#[tokio::test(flavor = "multi_thread")]
async fn wait_create_polls_until_creating_ends() -> anyhow::Result<()> {
    let (base, state) = start_mock_service(MockState {
        statuses: Mutex::new(VecDeque::from(["Creating", "Creating", "InService"])),
        ..Default::default()
    })
    .await?;
    let tmp = TempDir::new()?;
    let cfg = write_cli_config(&tmp, &base).await?;

    let output = Command::new(assert_cmd::cargo::cargo_bin!("mlep"))
        .env("MLEP_CONFIG_PATH", &cfg)
        .args(["endpoint", "wait-create", "--interval-secs", "0", "-o", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let description: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(description["EndpointName"], "sentiment-ep");
    assert_eq!(description["EndpointStatus"], "InService");
    assert_eq!(*state.describes.lock().unwrap(), 3);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn wait_update_reports_failed_status() -> anyhow::Result<()> {
    let (base, _state) = start_mock_service(MockState {
        statuses: Mutex::new(VecDeque::from(["Updating", "Failed"])),
        ..Default::default()
    })
    .await?;
    let tmp = TempDir::new()?;
    let cfg = write_cli_config(&tmp, &base).await?;

    Command::new(assert_cmd::cargo::cargo_bin!("mlep"))
        .env("MLEP_CONFIG_PATH", &cfg)
        .args(["endpoint", "wait-update", "my-ep", "--interval-secs", "0"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Endpoint 'my-ep' is Failed"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn models_list_prints_metadata_rows() -> anyhow::Result<()> {
    let (base, _state) = start_mock_service(MockState::default()).await?;
    let tmp = TempDir::new()?;
    let cfg = write_cli_config(&tmp, &base).await?;

    let output = Command::new(assert_cmd::cargo::cargo_bin!("mlep"))
        .env("MLEP_CONFIG_PATH", &cfg)
        .args(["models", "list", "-o", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let rows: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(rows[0]["Task"], "FILL_MASK");
    assert_eq!(rows[0]["FrameworkVersion"], "1.13");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn models_table_keeps_metadata_column_order() -> anyhow::Result<()> {
    let (base, _state) = start_mock_service(MockState::default()).await?;
    let tmp = TempDir::new()?;
    let cfg = write_cli_config(&tmp, &base).await?;

    let output = Command::new(assert_cmd::cargo::cargo_bin!("mlep"))
        .env("MLEP_CONFIG_PATH", &cfg)
        .args(["models", "list"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output)?;
    let header: Vec<&str> = text
        .lines()
        .next()
        .unwrap_or_default()
        .split('|')
        .map(str::trim)
        .collect();
    assert_eq!(
        header,
        ["Domain", "Task", "Framework", "FrameworkVersion", "Model"]
    );
    Ok(())
}

#[test]
fn unreachable_service_fails_with_command_label() {
    let tmp = TempDir::new().unwrap();
    let cfg = tmp.path().join("config.yml");
    std::fs::write(
        &cfg,
        "contexts:\n  default:\n    control_url: http://127.0.0.1:9\n    runtime_url: null\n    metrics_url: null\ncurrent_context: default\n",
    )
    .unwrap();

    Command::new(assert_cmd::cargo::cargo_bin!("mlep"))
        .env("MLEP_CONFIG_PATH", &cfg)
        .args(["endpoint", "describe", "ep"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Endpoint command failed"));
}
