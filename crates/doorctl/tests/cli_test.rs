//! Integration tests for the `doorctl` CLI binary.
//!
//! Argument parsing, help output and completions run offline. Door
//! commands run against a wiremock service via `--base-url`.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `doorctl` binary with env isolation.
///
/// Clears all `DOORCTL_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn doorctl_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("doorctl");
    cmd.env("HOME", "/tmp/doorctl-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/doorctl-cli-test-nonexistent")
        .env_remove("DOORCTL_PROFILE")
        .env_remove("DOORCTL_BASE_URL")
        .env_remove("DOORCTL_OUTPUT")
        .env_remove("DOORCTL_TIMEOUT")
        .env_remove("DOORCTL_USERNAME")
        .env_remove("DOORCTL_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

/// `doorctl_cmd` logged in against `server`.
fn door_cmd(server: &MockServer) -> assert_cmd::Command {
    let mut cmd = doorctl_cmd();
    cmd.args([
        "--base-url",
        &server.uri(),
        "--user",
        "me@example.com",
        "--password",
        "pw",
    ]);
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn door(id: i64, gateway: i64, name: &str, state: &str) -> Value {
    json!({
        "GatewayId": gateway,
        "MyQDeviceId": id,
        "Name": name,
        "State": state,
        "StateName": state,
        "LastUpdatedDateTime": "2015-03-01T12:30:00Z",
        "Error": false,
        "LowBattery": false
    })
}

/// A service with Garage(1)/Shed(2) and the given devices.
async fn service(devices: Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "SESSION=s1; Path=/"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Gateway/GetAllGateways"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Placeslist": [
                { "GatewayId": 2, "Name": "Shed", "ConnectServerId": "cs-2",
                  "DeviceList": "", "IsDetonator": false },
                { "GatewayId": 1, "Name": "Garage", "ConnectServerId": "cs-1",
                  "DeviceList": "10", "IsDetonator": false }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/MyQDevices/GetAllDevices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(devices))
        .mount(&server)
        .await;
    server
}

fn fixture() -> Value {
    json!([
        door(10, 1, "Main", "Closed"),
        door(11, 2, "Shed door", "Open")
    ])
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = doorctl_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    doorctl_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("garage doors")
            .and(predicate::str::contains("list-open"))
            .and(predicate::str::contains("locations"))
            .and(predicate::str::contains("--machine")),
    );
}

#[test]
fn test_version_flag() {
    doorctl_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("doorctl"));
}

#[test]
fn test_completions_zsh() {
    doorctl_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_config_path() {
    doorctl_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = doorctl_cmd().arg("foobar").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_open_requires_door_name() {
    doorctl_cmd().arg("open").assert().failure().code(2);
}

#[test]
fn test_list_without_credentials() {
    let output = doorctl_cmd().arg("list").output().unwrap();
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(text.contains("No username configured"), "{text}");
}

#[test]
fn test_unknown_profile() {
    doorctl_cmd()
        .args(["--profile", "cabin", "--user", "u", "--password", "p", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Profile 'cabin' not found"));
}

// ── Door commands against a mock service ────────────────────────────

#[tokio::test]
async fn test_list_human() {
    let server = service(fixture()).await;
    door_cmd(&server).arg("list").assert().success().stdout(
        predicate::str::contains("Main at Garage (id 10) is Closed since")
            .and(predicate::str::contains("Shed door at Shed (id 11) is Open since")),
    );
}

#[tokio::test]
async fn test_list_machine() {
    let server = service(fixture()).await;
    door_cmd(&server)
        .args(["-M", "list"])
        .assert()
        .success()
        .stdout("Main,Garage,10,Closed,1425213000,,\nShed door,Shed,11,Open,1425213000,,\n");
}

#[tokio::test]
async fn test_list_json() {
    let server = service(fixture()).await;
    let output = door_cmd(&server)
        .args(["--output", "json", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["name"], "Main");
    assert_eq!(parsed[0]["location"], "Garage");
    assert_eq!(parsed[0]["state"], "Closed");
}

#[tokio::test]
async fn test_locations_sorted_by_id() {
    let server = service(fixture()).await;
    door_cmd(&server)
        .arg("locations")
        .assert()
        .success()
        .stdout("Garage (ID 1)\nShed (ID 2)\n");

    door_cmd(&server)
        .args(["-M", "locations"])
        .assert()
        .success()
        .stdout("Garage,1\nShed,2\n");
}

#[tokio::test]
async fn test_state_prints_state_name() {
    let server = service(fixture()).await;
    door_cmd(&server)
        .args(["state", "Main"])
        .assert()
        .success()
        .stdout("Closed\n");
}

#[tokio::test]
async fn test_list_open_and_closed() {
    let server = service(fixture()).await;
    door_cmd(&server)
        .args(["-M", "listopen"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Shed door,"));
    door_cmd(&server)
        .args(["-M", "list-closed"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Main,"));
}

#[tokio::test]
async fn test_details_unknown_door() {
    let server = service(fixture()).await;
    door_cmd(&server)
        .args(["details", "Barn"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("No door named 'Barn'"));
}

#[tokio::test]
async fn test_open_closed_door() {
    let server = service(fixture()).await;
    Mock::given(method("POST"))
        .and(path("/Device/TriggerStateChange"))
        .and(body_string_contains("myQDeviceId=10"))
        .and(body_string_contains("attributevalue=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "errormessage": "" })))
        .expect(1)
        .mount(&server)
        .await;

    door_cmd(&server)
        .args(["open", "Main"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Open requested for door 'Main'"));
}

#[tokio::test]
async fn test_open_already_open_door_is_conflict() {
    let server = service(fixture()).await;
    Mock::given(method("POST"))
        .and(path("/Device/TriggerStateChange"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "errormessage": "" })))
        .expect(0)
        .mount(&server)
        .await;

    door_cmd(&server)
        .args(["open", "Shed door"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("already open"));
}

#[tokio::test]
async fn test_rejected_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    door_cmd(&server)
        .arg("list")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Login failed"));
}

#[tokio::test]
async fn test_debug_flag_traces_requests() {
    let server = service(fixture()).await;
    door_cmd(&server)
        .args(["-D", "-q", "list"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("GetAllGateways"));
}
