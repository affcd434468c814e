//! Integration tests for the `patron` CLI binary.
//!
//! Argument parsing and settings errors run without a backend; the query
//! and dashboard flows run against a wiremock upstream.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `patron` binary with env isolation.
fn patron_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("patron");
    cmd.env("HOME", "/tmp/patron-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/patron-cli-test-nonexistent")
        .env("XDG_DATA_HOME", "/tmp/patron-cli-test-nonexistent")
        .env_remove("PATRON_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Write a settings file pointing every endpoint at `base`.
fn write_settings(dir: &Path, base: &str) -> PathBuf {
    let path = dir.join("patron.toml");
    let storage = dir.join("dashboard.json");
    let toml = format!(
        r#"
[api.path]
login = "{base}/paia/auth/login"
user = "{base}/paia/core/{{id}}"
passwordUpdate = "{base}/paia/core/{{id}}/change"
pinUpdate = "{base}/paia/core/{{id}}/pin"
loanCurrent = "{base}/paia/core/{{id}}/items"
loanHistory = "{base}/paia/core/{{id}}/items/history"
reserveCurrent = "{base}/paia/core/{{id}}/reserve"
reserveHistory = "{base}/paia/core/{{id}}/reserve/history"

[general]
itemsPerPage = 25

[dashboard]
storage = "{}"
"#,
        storage.display()
    );
    std::fs::write(&path, toml).unwrap();
    path
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run(args: Vec<String>) -> std::process::Output {
    tokio::task::spawn_blocking(move || patron_cmd().args(&args).output().unwrap())
        .await
        .unwrap()
}

fn args(config: &Path, rest: &[&str]) -> Vec<String> {
    let mut all = vec![
        "--config".to_string(),
        config.display().to_string(),
        "-o".to_string(),
        "json-compact".to_string(),
    ];
    all.extend(rest.iter().map(ToString::to_string));
    all
}

fn stdout_json(output: &std::process::Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

async fn mount_patron(server: &MockServer, id: i64) {
    Mock::given(method("GET"))
        .and(path(format!("/paia/core/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "Patron" })))
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = patron_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_commands() {
    patron_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("reserve")
            .and(predicate::str::contains("loan"))
            .and(predicate::str::contains("dashboard")),
    );
}

#[test]
fn test_version_flag() {
    patron_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("patron"));
}

#[test]
fn test_completions_bash() {
    patron_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_history_requires_user() {
    patron_cmd()
        .args(["reserve", "history"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--user"));
}

// ── Settings ────────────────────────────────────────────────────────

#[test]
fn test_missing_settings_file_fails_with_config_code() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");

    patron_cmd()
        .args(["--config", missing.to_str().unwrap(), "reserve", "current", "-u", "1"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Could not load settings"));
}

#[test]
fn test_partial_settings_fail() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("patron.toml");
    std::fs::write(
        &path,
        "[api.path]\nlogin = \"https://lib.example/login\"\nuser = \"https://lib.example/{id}\"\n",
    )
    .unwrap();

    patron_cmd()
        .args(["--config", path.to_str().unwrap(), "config", "show"])
        .assert()
        .code(5);
}

#[test]
fn test_config_show_prints_paths() {
    let dir = TempDir::new().unwrap();
    let config = write_settings(dir.path(), "https://lib.example");

    let output = patron_cmd()
        .args(["--config", config.to_str().unwrap(), "-o", "json-compact", "config", "show"])
        .output()
        .unwrap();

    let shown = stdout_json(&output);
    assert_eq!(
        shown["api"]["reserveHistory"],
        "https://lib.example/paia/core/{id}/reserve/history"
    );
    assert_eq!(shown["api"]["passwordUpdate"], "https://lib.example/paia/core/{id}/change");
    assert_eq!(shown["itemsPerPage"], 25);
    assert_eq!(shown["http"]["timeout"], 30);
}

#[test]
fn test_config_show_resolves_bad_page_size() {
    let dir = TempDir::new().unwrap();
    let config = write_settings(dir.path(), "https://lib.example");
    let content = std::fs::read_to_string(&config)
        .unwrap()
        .replace("itemsPerPage = 25", "itemsPerPage = \"many\"");
    std::fs::write(&config, content).unwrap();

    let output = patron_cmd()
        .args(["--config", config.to_str().unwrap(), "-o", "json-compact", "config", "show"])
        .output()
        .unwrap();

    assert_eq!(stdout_json(&output)["itemsPerPage"], 25);
}

// ── Reservations ────────────────────────────────────────────────────

#[tokio::test]
async fn test_reserve_current() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = write_settings(dir.path(), &server.uri());

    mount_patron(&server, 1234).await;
    Mock::given(method("GET"))
        .and(path("/paia/core/1234/reserve"))
        .and(header("X-SLUB-sort", "DESC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reserve": [{ "item": "urn:slub:1" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(args(&config, &["reserve", "current", "--user", "1234"])).await;

    assert_eq!(
        stdout_json(&output),
        json!({ "reserveCurrent": [{ "item": "urn:slub:1" }] })
    );
}

#[tokio::test]
async fn test_reserve_history_second_page() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = write_settings(dir.path(), &server.uri());

    mount_patron(&server, 1234).await;
    Mock::given(method("GET"))
        .and(path("/paia/core/1234/reserve/history"))
        .and(header("X-SLUB-count", "25"))
        .and(header("X-SLUB-offset", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 7,
            "history": ["h"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(args(&config, &["reserve", "history", "-u", "1234", "--page", "2"])).await;

    assert_eq!(
        stdout_json(&output),
        json!({
            "paginator": { "countItems": 7, "currentPage": 2, "itemsPerPage": 25 },
            "reserveHistory": ["h"]
        })
    );
}

#[tokio::test]
async fn test_unauthenticated_user_prints_empty_object() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = write_settings(dir.path(), &server.uri());

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let output = run(args(&config, &["loan", "current", "--user", "0"])).await;
    assert_eq!(stdout_json(&output), json!({}));
}

#[tokio::test]
async fn test_upstream_not_found_exit_code() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = write_settings(dir.path(), &server.uri());

    Mock::given(method("GET"))
        .and(path("/paia/core/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let output = run(args(&config, &["reserve", "current", "-u", "404"])).await;
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_unreachable_upstream_exit_code() {
    let dir = TempDir::new().unwrap();
    let config = write_settings(dir.path(), "http://127.0.0.1:1");

    patron_cmd()
        .args(["--config", config.to_str().unwrap(), "--timeout", "5"])
        .args(["reserve", "current", "-u", "7"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Could not reach the account backend"));
}

// ── Dashboard ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_dashboard_update_then_show() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = write_settings(dir.path(), &server.uri());
    mount_patron(&server, 31).await;

    let output = run(args(
        &config,
        &["dashboard", "update", "-u", "31", "-w", "loans", "-w", "search", "-w", "loans"],
    ))
    .await;
    let updated = stdout_json(&output);
    assert_eq!(updated["accountId"], 31);
    assert_eq!(updated["dashboardWidgets"], "loans,search");

    let output = run(args(&config, &["dashboard", "show", "-u", "31"])).await;
    let shown = stdout_json(&output);
    assert_eq!(shown["dashboardWidgets"], "loans,search");

    assert!(dir.path().join("dashboard.json").exists());
}

#[tokio::test]
async fn test_dashboard_update_from_payload_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = write_settings(dir.path(), &server.uri());
    mount_patron(&server, 32).await;

    let payload = dir.path().join("payload.json");
    std::fs::write(&payload, r#"{ "widgets": ["news", "<script>", "loans"] }"#).unwrap();

    let output = run(args(
        &config,
        &["dashboard", "update", "-u", "32", "--payload", payload.to_str().unwrap()],
    ))
    .await;

    assert_eq!(stdout_json(&output)["dashboardWidgets"], "news,loans");
}
