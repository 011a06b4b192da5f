// tests/config_test.rs
use std::env;
use std::fs;
use std::io::Write;

use serial_test::serial;
use tempfile::{NamedTempFile, TempDir};
use utility_cli::config::{load_config, Config, LOCAL_CONFIG_FILE};
use utility_cli::UtilityError;

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.aws.region, None);
    assert!(config.charts.update_app_version);
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[aws]
region = "us-west-2"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.aws.region.as_deref(), Some("us-west-2"));
    assert_eq!(config.aws.endpoint_url, None);
    assert!(config.charts.update_app_version);
}

#[test]
fn test_load_fixture() {
    let fixture = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/config_with_charts.toml");
    let config = load_config(Some(fixture))
        .expect("Failed to load test config");
    assert_eq!(config.aws.region.as_deref(), Some("eu-west-1"));
    assert_eq!(
        config.aws.endpoint_url.as_deref(),
        Some("http://localhost:4566")
    );
    assert!(!config.charts.update_app_version);
}

#[test]
fn test_invalid_toml_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[aws\nregion = ").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(matches!(err, UtilityError::Config(_)));
}

#[test]
fn test_missing_explicit_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");
    let err = load_config(Some(missing.to_str().unwrap())).unwrap_err();
    assert!(matches!(err, UtilityError::Io(_)));
}

#[test]
#[serial]
fn test_local_config_file_is_discovered() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(LOCAL_CONFIG_FILE),
        "[aws]\nregion = \"ap-south-1\"\n",
    )
    .unwrap();

    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let result = load_config(None);
    env::set_current_dir(original_dir).unwrap();

    let config = result.expect("Should load local config");
    assert_eq!(config.aws.region.as_deref(), Some("ap-south-1"));
}
