use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;

fn dexwatch() -> Command {
    let mut cmd = cargo_bin_cmd!("dexwatch");
    cmd.env_remove("TELEGRAM_BOT_TOKEN")
        .env_remove("TELEGRAM_CHAT_ID")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn test_help() {
    dexwatch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("dexwatch"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("ledger"));
}

#[test]
fn test_version() {
    dexwatch()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn check_config_reports_missing_telegram_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "[poll]\ninterval_secs = 15\n");

    dexwatch()
        .args(["check", "config", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"))
        .stdout(predicate::str::contains("TELEGRAM_BOT_TOKEN"));
}

#[test]
fn check_config_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "[telegram]\nenabled = false\n");

    let output = dexwatch()
        .args(["--json", "check", "config", "--config"])
        .arg(&path)
        .output()
        .expect("run dexwatch");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json report");
    assert_eq!(report["command"], "check.config");
    assert_eq!(report["telegram_enabled"], false);
    assert_eq!(report["status"], "valid");
}

#[test]
fn cli_returns_nonzero_on_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "[feed]\nattempts = 0\n");

    dexwatch()
        .args(["check", "config", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("feed.attempts"));
}

#[test]
fn run_fails_fast_without_telegram_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "[telegram]\nenabled = true\n");

    dexwatch()
        .args(["--quiet", "run", "--once", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("TELEGRAM_BOT_TOKEN"));
}

#[test]
fn ledger_show_lists_keys() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = dir.path().join("notified.json");
    fs::write(&ledger, r#"["0xbbb", "0xaaa"]"#).unwrap();
    let path = write_config(
        dir.path(),
        &format!("[ledger]\npath = {:?}\n", ledger.display().to_string()),
    );

    let output = dexwatch()
        .args(["--json", "ledger", "show", "--config"])
        .arg(&path)
        .output()
        .expect("run dexwatch");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json report");
    assert_eq!(report["count"], 2);
    assert_eq!(report["keys"], serde_json::json!(["0xaaa", "0xbbb"]));
}

#[test]
fn ledger_show_rejects_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = dir.path().join("notified.json");
    fs::write(&ledger, "{not json").unwrap();
    let path = write_config(
        dir.path(),
        &format!("[ledger]\npath = {:?}\n", ledger.display().to_string()),
    );

    dexwatch()
        .args(["ledger", "show", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed ledger"));
}

async fn serve_feed(body: serde_json::Value) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = axum::Router::new().route(
        "/profiles",
        axum::routing::get(move || {
            let body = body.clone();
            async move { axum::Json(body) }
        }),
    );
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}/profiles")
}

#[tokio::test(flavor = "multi_thread")]
async fn check_feed_dumps_raw_records_at_high_verbosity() {
    let url = serve_feed(json!([{
        "tokenAddress": "0xabc",
        "chainId": "solana",
        "oddShape": {"nested": [1, 2]},
        "links": [{"type": "telegram", "url": "https://t.me/abc"}]
    }]))
    .await;
    let dir = tempfile::tempdir().unwrap();
    let ledger = dir.path().join("notified.json");
    let path = write_config(
        dir.path(),
        &format!(
            "[feed]\nurl = {url:?}\n\n[ledger]\npath = {:?}\n",
            ledger.display().to_string()
        ),
    );

    let run = |verbosity: &'static str| {
        let path = path.clone();
        tokio::task::spawn_blocking(move || {
            dexwatch()
                .args([verbosity, "check", "feed", "--config"])
                .arg(&path)
                .output()
                .expect("run dexwatch")
        })
    };

    let plain = run("-v").await.unwrap();
    assert!(plain.status.success());
    let plain = String::from_utf8_lossy(&plain.stdout);
    assert!(plain.contains("Fetched 1 records"));
    assert!(!plain.contains("oddShape"));

    let dumped = run("-vv").await.unwrap();
    assert!(dumped.status.success());
    let dumped = String::from_utf8_lossy(&dumped.stdout);
    assert!(dumped.contains("Record #1"));
    assert!(dumped.contains("oddShape"));
    assert!(!ledger.exists());
}
