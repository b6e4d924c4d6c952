//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! layering environment variables on top.

use std::io::Write;

use tempfile::NamedTempFile;
use wadash_domain::DashError;
use wadash_infra::config;

fn write_config(extension: &str, contents: &str) -> (NamedTempFile, std::path::PathBuf) {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    (temp_file, path)
}

#[test]
fn test_file_then_env_precedence() {
    let toml_content = r#"
[api]
base_url = "http://scraper.internal:8001/"
api_key = "file-key"
timeout_ms = 10000

[polling]
connectivity_interval_ms = 30000
"#;
    let (_temp_file, path) = write_config("toml", toml_content);

    // The only test in this binary touching the environment.
    std::env::set_var("WADASH_API_KEY", "env-key");
    std::env::set_var("WADASH_QR_POLL_INTERVAL_MS", "1000");

    let result = config::load(Some(path.clone()));

    std::env::remove_var("WADASH_API_KEY");
    std::env::remove_var("WADASH_QR_POLL_INTERVAL_MS");
    std::fs::remove_file(&path).ok();

    let config = result.expect("config loads");

    // File values beat defaults
    assert_eq!(config.api.base_url, "http://scraper.internal:8001/");
    assert_eq!(config.api.normalized_base_url(), "http://scraper.internal:8001");
    assert_eq!(config.api.timeout_ms, 10_000);
    assert_eq!(config.polling.connectivity_interval_ms, 30_000);

    // Environment beats the file
    assert_eq!(config.api.api_key, "env-key");
    assert_eq!(config.polling.qr_scan_interval_ms, 1_000);

    // Untouched keys keep defaults
    assert_eq!(config.api.retries, 1);
    assert_eq!(config.api.backoff_unit_ms, 1_000);
}

#[test]
fn test_invalid_json_file() {
    let (_temp_file, path) = write_config("json", r#"{"api": {"retries": "many"}}"#);

    let result = config::load_from_file(&path);
    std::fs::remove_file(&path).ok();

    assert!(matches!(result, Err(DashError::Config(_))));
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let result = config::load(Some("/nonexistent/wadash.toml".into()));
    assert!(matches!(result, Err(DashError::Config(_))));
}
