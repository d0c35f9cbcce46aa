//! CLI end-to-end tests that invoke the compiled `mirror` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the mirror binary with a clean environment
fn mirror_cmd() -> Command {
    let mut cmd = Command::cargo_bin("mirror").expect("Failed to find mirror binary");
    cmd.env_remove("MIRROR_CONFIG")
        .env_remove("MIRROR_API_KEY")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn write_config(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

const VALID: &str = r#"
[server]
url = "http://emby.local:8096"
api_key = "k"

[schedule]
interval_secs = 3600

[[collections]]
name = "trending"
target = "/mnt/mirror/trending"

[[collections]]
id = "77"
target = "/mnt/mirror/shows"
kind = "show"

[[path_rules]]
from = "D:\\Media"
to = "/mnt/media"
"#;

// ============================================================================
// Argument handling
// ============================================================================

#[test]
fn help_lists_commands() {
    mirror_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn version_flag() {
    mirror_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mirror"));
}

#[test]
fn missing_subcommand_fails() {
    mirror_cmd().assert().failure();
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn missing_config_is_reported() {
    let dir = TempDir::new().unwrap();
    mirror_cmd()
        .current_dir(dir.path())
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"))
        .stderr(predicate::str::contains("mirror.toml"));
}

#[test]
fn validate_prints_summary() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "mirror.toml", VALID);
    mirror_cmd()
        .arg("validate")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("trending (movie) -> /mnt/mirror/trending"))
        .stdout(predicate::str::contains("77 (show) -> /mnt/mirror/shows"))
        .stdout(predicate::str::contains("interval: 3600s"));
}

#[test]
fn config_path_from_environment() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "custom.toml", VALID);
    mirror_cmd()
        .env("MIRROR_CONFIG", &config)
        .arg("validate")
        .assert()
        .success();
}

#[test]
fn json_and_yaml_configs_are_accepted() {
    let dir = TempDir::new().unwrap();
    let json = write_config(
        dir.path(),
        "mirror.json",
        r#"{"server":{"url":"http://emby.local"},"collections":[{"id":"1","target":"/m"}]}"#,
    );
    let yaml = write_config(
        dir.path(),
        "mirror.yml",
        "server:\n  url: http://emby.local\ncollections:\n  - id: \"1\"\n    target: /m\n",
    );

    for config in [json, yaml] {
        mirror_cmd()
            .arg("validate")
            .arg("-c")
            .arg(&config)
            .assert()
            .success();
    }
}

#[test]
fn unsupported_extension_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "mirror.ini", "[server]\n");
    mirror_cmd()
        .args(["validate", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("ini"));
}

#[test]
fn config_without_collections_is_invalid() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        dir.path(),
        "mirror.toml",
        "[server]\nurl = \"http://emby.local\"\n",
    );
    mirror_cmd()
        .args(["validate", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn collection_with_id_and_name_is_invalid() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        dir.path(),
        "mirror.toml",
        r#"
[server]
url = "http://emby.local"

[[collections]]
id = "1"
name = "trending"
target = "/m"
"#,
    );
    mirror_cmd()
        .args(["validate", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

// ============================================================================
// Cycles against an unreachable server
// ============================================================================

fn unreachable_config(dir: &Path) -> std::path::PathBuf {
    let target = dir.join("mirror");
    write_config(
        dir,
        "mirror.toml",
        &format!(
            "[server]\nurl = \"http://127.0.0.1:9\"\ntimeout_secs = 2\n\n[[collections]]\nid = \"1\"\ntarget = '{}'\n",
            target.display()
        ),
    )
}

#[test]
fn sync_reports_failed_collection() {
    let dir = TempDir::new().unwrap();
    let config = unreachable_config(dir.path());
    mirror_cmd()
        .args(["sync", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stdout(predicate::str::contains("ERROR"))
        .stderr(predicate::str::contains("1 collection(s) failed"));
}

#[test]
fn sync_json_reports_failed_status() {
    let dir = TempDir::new().unwrap();
    let config = unreachable_config(dir.path());
    let output = mirror_cmd()
        .args(["sync", "--json", "-c"])
        .arg(&config)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["outcomes"][0]["status"], "failed");
    assert_eq!(report["outcomes"][0]["collection"], "1");
}

#[test]
fn run_rejects_zero_interval() {
    let dir = TempDir::new().unwrap();
    let config = unreachable_config(dir.path());
    mirror_cmd()
        .args(["run", "--interval-secs", "0", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be positive"));
}
