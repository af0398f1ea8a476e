use std::time::Duration;

use async_trait::async_trait;

use super::parse_document;
use crate::domain::entities::monitor_spec::DesiredSet;
use crate::domain::ports::config_source::{ConfigError, ConfigSource};

/// Fetches the desired monitors as JSON over HTTP(S).
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    /// # Errors
    ///
    /// Returns `ConfigError::Unavailable` if the HTTP client cannot be
    /// initialized.
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ConfigError::Unavailable(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl ConfigSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn load_desired_monitors(&self) -> Result<DesiredSet, ConfigError> {
        tracing::debug!("Fetching monitor config from remote URL: {}", self.url);
        let unavailable = |e: reqwest::Error| ConfigError::Unavailable(format!("{}: {e}", self.url));

        let bytes = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(unavailable)?
            .bytes()
            .await
            .map_err(unavailable)?;

        parse_document(&bytes)
    }
}
