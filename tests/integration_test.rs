// tests/integration_test.rs
use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn utility(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("utility").expect("binary should be built");
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_utility_help() {
    let dir = TempDir::new().unwrap();
    utility(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Utility functions for automation"))
        .stdout(predicate::str::contains("sagemaker"))
        .stdout(predicate::str::contains("update-charts"));
}

#[test]
fn test_utility_version_flag() {
    let dir = TempDir::new().unwrap();
    utility(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_minor_bump_end_to_end() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("VERSION");
    fs::write(&file, "v0.9.5").unwrap();

    utility(dir.path())
        .args(["version", "VERSION", "minor"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("v0.10.0\n"))
        .stdout(predicate::str::contains("Saved to VERSION"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "v0.10.0");
}

#[test]
fn test_version_major_bump_end_to_end() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("VERSION");
    fs::write(&file, "v0.9.5\n").unwrap();

    utility(dir.path())
        .args(["version", "VERSION", "MAJOR release"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("v1.0.0\n"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "v1.0.0");
}

#[test]
fn test_version_creates_missing_file() {
    let dir = TempDir::new().unwrap();

    utility(dir.path())
        .args(["version", "tag.txt", "fix a bug"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("v0.0.1\n"))
        .stdout(predicate::str::contains("Saved to tag.txt"));

    assert_eq!(
        fs::read_to_string(dir.path().join("tag.txt")).unwrap(),
        "v0.0.1"
    );
}

#[test]
fn test_version_malformed_file_fails_without_writing() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("VERSION");
    fs::write(&file, "1.2").unwrap();

    utility(dir.path())
        .args(["version", "VERSION", "minor"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Parse error"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "1.2");
}

#[test]
fn test_version_at_max_component_fails_without_writing() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("VERSION");
    let max = format!("v{}.0.0", u64::MAX);
    fs::write(&file, &max).unwrap();

    utility(dir.path())
        .args(["version", "VERSION", "major"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("out of range"));

    assert_eq!(fs::read_to_string(&file).unwrap(), max);
}

#[test]
fn test_version_ignores_broken_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("utility.toml"), "[charts\nbroken").unwrap();

    utility(dir.path())
        .args(["version", "VERSION", "patch"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("v0.0.1\n"));
}

#[test]
fn test_update_charts_reports_broken_config() {
    let dir = TempDir::new().unwrap();
    let fixture = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/Chart.yaml");
    fs::copy(fixture, dir.path().join("Chart.yaml")).unwrap();
    fs::write(dir.path().join("utility.toml"), "[charts\nbroken").unwrap();

    utility(dir.path())
        .args(["update-charts", "Chart.yaml", "0.4.0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_update_charts_end_to_end() {
    let dir = TempDir::new().unwrap();
    let fixture = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/Chart.yaml");
    fs::copy(fixture, dir.path().join("Chart.yaml")).unwrap();

    utility(dir.path())
        .args(["update-charts", "Chart.yaml", "v0.4.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated Chart.yaml with version v0.4.0"));

    let chart = fs::read_to_string(dir.path().join("Chart.yaml")).unwrap();
    assert!(chart.contains("\nversion: 0.4.0\n"));
    assert!(chart.contains("appVersion: \"v0.4.0\""));
    assert!(chart.contains("    version: 17.3.7\n"));
}

#[test]
fn test_update_charts_respects_config() {
    let dir = TempDir::new().unwrap();
    let fixture = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/Chart.yaml");
    fs::copy(fixture, dir.path().join("Chart.yaml")).unwrap();
    fs::write(
        dir.path().join("utility.toml"),
        "[charts]\nupdate_app_version = false\n",
    )
    .unwrap();

    utility(dir.path())
        .args(["update-charts", "Chart.yaml", "0.4.0"])
        .assert()
        .success();

    let chart = fs::read_to_string(dir.path().join("Chart.yaml")).unwrap();
    assert!(chart.contains("\nversion: 0.4.0\n"));
    assert!(chart.contains("appVersion: \"v0.3.0\""));
}

#[test]
fn test_update_charts_rejects_invalid_version() {
    let dir = TempDir::new().unwrap();
    let fixture = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/Chart.yaml");
    fs::copy(fixture, dir.path().join("Chart.yaml")).unwrap();

    utility(dir.path())
        .args(["update-charts", "Chart.yaml", "latest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid chart version"));
}

#[test]
fn test_sagemaker_rejects_unknown_choice() {
    let dir = TempDir::new().unwrap();
    utility(dir.path())
        .args(["sagemaker", "-n", "demo", "-r", "arn:role", "-c", "restart"])
        .assert()
        .failure()
        .code(2);
}
