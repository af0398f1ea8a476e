pub mod file_source;
pub mod http_source;

use crate::application::config::SourceConfig;
use crate::domain::entities::monitor_spec::{DesiredSet, MonitorsDocument};
use crate::domain::ports::config_source::{ConfigError, ConfigSource};

use self::file_source::FileSource;
use self::http_source::HttpSource;

/// Parse a desired-configuration JSON document.
///
/// # Errors
///
/// Returns `ConfigError::Malformed` if the bytes are not a valid document.
pub fn parse_document(bytes: &[u8]) -> Result<DesiredSet, ConfigError> {
    let document: MonitorsDocument =
        serde_json::from_slice(bytes).map_err(|e| ConfigError::Malformed(e.to_string()))?;
    let set = DesiredSet::from(document);
    tracing::debug!(
        "Loaded {} monitor(s) from configuration ({} rejected)",
        set.monitors.len(),
        set.rejected.len()
    );
    Ok(set)
}

/// Pick the source for `config`: the remote URL when one is set, otherwise
/// the local file.
///
/// # Errors
///
/// Returns `ConfigError::Unavailable` if the HTTP client cannot be built.
pub fn create_config_source(config: &SourceConfig) -> Result<Box<dyn ConfigSource>, ConfigError> {
    match config.url.as_deref() {
        Some(url) => Ok(Box::new(HttpSource::new(url, config.timeout_secs)?)),
        None => Ok(Box::new(FileSource::new(config.path.clone()))),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parse_document_reads_monitors() {
        let json = br#"{"Monitors": [{
            "Monitor_Name": "DiskFull",
            "Index": "logs-*",
            "Text2Scan_in_Message": "disk full",
            "Time2Scan": "15m",
            "notification_channel": "ops-slack"
        }]}"#;
        let set = parse_document(json).expect("parse");
        assert_eq!(set.monitors.len(), 1);
        assert_eq!(set.monitors[0].time_window.minutes(), 15);
    }

    #[test]
    fn parse_document_rejects_invalid_json() {
        let err = parse_document(b"not json").expect_err("invalid");
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn parse_document_keeps_valid_entry_beside_mistyped_one() {
        let json = br#"{"Monitors": [
            {"Monitor_Name": "Good", "Index": "logs-*", "Text2Scan_in_Message": "k",
             "Time2Scan": "5m", "notification_channel": "c"},
            {"Monitor_Name": "Bad", "Index": "logs-*", "Text2Scan_in_Message": "k",
             "Time2Scan": 15, "notification_channel": "c"}
        ]}"#;
        let set = parse_document(json).expect("per-entry failures are not fatal");
        assert_eq!(set.monitors.len(), 1);
        assert_eq!(set.monitors[0].name, "Good");
        assert_eq!(set.reserved_names(), vec!["Bad".to_string()]);
    }

    #[test]
    fn parse_document_rejects_non_array_monitors() {
        let err = parse_document(br#"{"Monitors": {"Monitor_Name": "x"}}"#).expect_err("shape");
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn factory_prefers_url() {
        let config = SourceConfig {
            path: PathBuf::from("local.json"),
            url: Some("https://cfg.example.com/monitors.json".into()),
            timeout_secs: 10,
        };
        let source = create_config_source(&config).expect("source");
        assert_eq!(source.describe(), "https://cfg.example.com/monitors.json");
    }

    #[test]
    fn factory_falls_back_to_file() {
        let config = SourceConfig {
            path: PathBuf::from("local.json"),
            url: None,
            timeout_secs: 10,
        };
        let source = create_config_source(&config).expect("source");
        assert_eq!(source.describe(), "local.json");
    }
}
