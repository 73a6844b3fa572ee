//! Command-line behaviour that needs no grid.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ibx(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ibx").unwrap();
    cmd.env("IBX_CONFIG", config_dir.path().join("config.toml"))
        .env_remove("IBX_HOST")
        .env_remove("IBX_USERNAME")
        .env_remove("IBX_PASSWORD")
        .env_remove("IBX_TENANT_ID")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    ibx(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("network"))
        .stdout(predicate::str::contains("zone"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_network_update_rejected() {
    let dir = TempDir::new().unwrap();
    ibx(&dir)
        .args(["network", "update", "network/ZG5z:10.0.0.0/24/default"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("network update is not supported"));
}

#[test]
fn test_zone_update_rejected() {
    let dir = TempDir::new().unwrap();
    ibx(&dir)
        .args(["zone", "update", "zone_auth/ZG5z:aaa.com/default"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("auth zone update is not supported"));
}

#[test]
fn test_missing_host_reported() {
    let dir = TempDir::new().unwrap();
    ibx(&dir)
        .args(["zone", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Grid host required"));
}

#[test]
fn test_bad_prefix_length_rejected_before_connecting() {
    let dir = TempDir::new().unwrap();
    ibx(&dir)
        .args([
            "network",
            "allocate",
            "--cidr",
            "10.0.0.0/8",
            "--prefix-length",
            "twenty",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error converting prefix length"));
}

#[test]
fn test_network_allocate_requires_tenant() {
    let dir = TempDir::new().unwrap();
    ibx(&dir)
        .args([
            "network",
            "allocate",
            "--cidr",
            "10.0.0.0/8",
            "--prefix-length",
            "24",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a tenant id"))
        .stderr(predicate::str::contains("Grid host required").not());
}

#[test]
fn test_zone_create_requires_tenant() {
    let dir = TempDir::new().unwrap();
    ibx(&dir)
        .args(["zone", "create", "aaa.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a tenant id"));
}

#[test]
fn test_config_show_uses_config_file_names() {
    let dir = TempDir::new().unwrap();
    ibx(&dir)
        .args(["config", "set", "subdomain_match", "label-suffix"])
        .assert()
        .success();
    ibx(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("label-suffix"))
        .stdout(predicate::str::contains("LabelSuffix").not());
}

#[test]
fn test_config_round_trip() {
    let dir = TempDir::new().unwrap();

    ibx(&dir)
        .args(["config", "set", "host", "gm.example.com"])
        .assert()
        .success();
    ibx(&dir)
        .args(["config", "set", "password", "hunter2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hunter2").not());

    ibx(&dir)
        .args(["--output", "json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gm.example.com"))
        .stdout(predicate::str::contains("****"))
        .stdout(predicate::str::contains("hunter2").not());

    let saved = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(saved.contains("host = \"gm.example.com\""));
}

#[test]
fn test_config_path_honours_override() {
    let dir = TempDir::new().unwrap();
    let expected = dir.path().join("config.toml");
    ibx(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));
}

#[test]
fn test_config_set_unknown_key() {
    let dir = TempDir::new().unwrap();
    ibx(&dir)
        .args(["config", "set", "api_key", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}
