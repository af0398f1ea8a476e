use std::path::PathBuf;

use async_trait::async_trait;

use super::parse_document;
use crate::domain::entities::monitor_spec::DesiredSet;
use crate::domain::ports::config_source::{ConfigError, ConfigSource};

/// Reads the desired monitors from a local JSON file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ConfigSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load_desired_monitors(&self) -> Result<DesiredSet, ConfigError> {
        tracing::debug!("Loading monitor config from local file: {}", self.path.display());
        let bytes = std::fs::read(&self.path).map_err(|e| {
            ConfigError::Unavailable(format!("cannot read {}: {e}", self.path.display()))
        })?;
        parse_document(&bytes)
    }
}
