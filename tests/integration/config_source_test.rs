#![allow(clippy::expect_used)]

use std::io::Write;
use std::path::PathBuf;

use monsync::application::config::{AppConfig, SourceConfig};
use monsync::domain::ports::config_source::ConfigError;
use monsync::infrastructure::config_source::create_config_source;

fn fixture_path(name: &str) -> PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[tokio::test]
async fn file_source_loads_fixture() {
    let config = SourceConfig {
        path: fixture_path("monitors.json"),
        ..SourceConfig::default()
    };
    let source = create_config_source(&config).expect("source");

    let desired = source.load_desired_monitors().await.expect("load");

    let names: Vec<&str> = desired.monitors.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["DiskFull", "OutOfMemory", "PaymentTimeouts"]);
    assert_eq!(desired.monitors[1].time_window.minutes(), 15);
    assert_eq!(desired.rejected.len(), 1);
    assert_eq!(desired.rejected[0].name, "LegacyHourly");
}

#[tokio::test]
async fn missing_monitors_key_yields_empty_set() {
    let mut tmpfile = tempfile::NamedTempFile::new().expect("create tempfile");
    tmpfile.write_all(b"{}").expect("write");
    let config = SourceConfig {
        path: tmpfile.path().to_path_buf(),
        ..SourceConfig::default()
    };

    let desired = create_config_source(&config)
        .expect("source")
        .load_desired_monitors()
        .await
        .expect("load");

    assert!(desired.is_empty());
    assert!(desired.rejected.is_empty());
}

#[tokio::test]
async fn malformed_file_is_reported() {
    let mut tmpfile = tempfile::NamedTempFile::new().expect("create tempfile");
    tmpfile.write_all(b"{\"Monitors\": [").expect("write");
    let config = SourceConfig {
        path: tmpfile.path().to_path_buf(),
        ..SourceConfig::default()
    };

    let err = create_config_source(&config)
        .expect("source")
        .load_desired_monitors()
        .await
        .expect_err("malformed");

    assert!(matches!(err, ConfigError::Malformed(_)));
}

#[tokio::test]
async fn url_takes_precedence_over_path() {
    let config = SourceConfig {
        path: fixture_path("monitors.json"),
        url: Some("http://127.0.0.1:1/monitors.json".to_string()),
        timeout_secs: 2,
    };
    let source = create_config_source(&config).expect("source");

    assert_eq!(source.describe(), "http://127.0.0.1:1/monitors.json");
    let err = source.load_desired_monitors().await.expect_err("unreachable");
    assert!(matches!(err, ConfigError::Unavailable(_)));
}

#[test]
fn toml_and_environment_layers_combine() {
    let mut tmpfile = tempfile::NamedTempFile::new().expect("create tempfile");
    tmpfile
        .write_all(
            br#"
[backend]
host = "search.internal"
port = 9201

[source]
path = "/etc/monsync/monitors.json"
"#,
        )
        .expect("write");

    let mut config = AppConfig::load(Some(tmpfile.path())).expect("load");
    config
        .apply_env(|key| match key {
            "OPENSEARCH_USER" => Some("ops".to_string()),
            "MONITORS_URL" => Some("https://cfg.example.com/monitors.json".to_string()),
            _ => None,
        })
        .expect("env");

    assert_eq!(config.backend.host, "search.internal");
    assert_eq!(config.backend.port, 9201);
    assert_eq!(config.backend.username, "ops");
    assert_eq!(config.backend.password, "admin");
    assert_eq!(
        config.source.url.as_deref(),
        Some("https://cfg.example.com/monitors.json")
    );
    let debug = format!("{:?}", config.backend);
    assert!(debug.contains("password: \"***\""));
    assert!(!debug.contains("password: \"admin\""));
}
