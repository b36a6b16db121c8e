//! Configuration loading tests

use pagespeed_watcher::config::Config;
use std::io::Write;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_shipped_example_config_parses() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/watcher.yaml.example");
    let config = Config::from_file(path).await.expect("example must stay valid");
    assert_eq!(config.quota().daily_limit, 25_000);
    assert_eq!(config.quota().per_minute_limit, 10);
}

#[tokio::test]
async fn test_partial_file_fills_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"psi_api_key: partial-key\n").unwrap();

    let config = Config::from_file(file.path()).await.unwrap();
    assert_eq!(config.watcher.psi_api_key.as_deref(), Some("partial-key"));
    assert_eq!(config.quota().daily_limit, 25_000);
    assert_eq!(config.http().timeout_secs, 120);
    assert!(!config.storage().redis.enabled);
}

#[tokio::test]
async fn test_invalid_yaml_is_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"quota: [not, a, map]\n").unwrap();

    assert!(Config::from_file(file.path()).await.is_err());
}

#[tokio::test]
async fn test_missing_file_is_config_error() {
    assert!(Config::from_file("/nonexistent/watcher.yaml").await.is_err());
}
