use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::monitor_spec::DesiredSet;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("desired configuration unavailable: {0}")]
    Unavailable(String),
    #[error("desired configuration is not valid JSON: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Human-readable origin of the configuration (path or URL).
    fn describe(&self) -> String;

    /// Load and validate the desired monitors.
    ///
    /// Entries that fail validation are returned in `DesiredSet::rejected`
    /// rather than failing the whole load.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the document cannot be read or parsed.
    async fn load_desired_monitors(&self) -> Result<DesiredSet, ConfigError>;
}
