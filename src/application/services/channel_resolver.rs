use crate::domain::errors::SyncError;
use crate::domain::ports::backend::BackendGateway;

/// Resolves notification channel names to backend ids.
///
/// The channel registry is read on every call; nothing is cached.
pub struct ChannelResolver<'a> {
    backend: &'a dyn BackendGateway,
}

impl<'a> ChannelResolver<'a> {
    #[must_use]
    pub fn new(backend: &'a dyn BackendGateway) -> Self {
        Self { backend }
    }

    /// Returns the id of the first channel whose name equals `channel_name`
    /// exactly (case-sensitive).
    ///
    /// A failure to list channels is logged and treated as an empty registry.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::ChannelNotFound` when no channel matches.
    pub async fn resolve(&self, monitor: &str, channel_name: &str) -> Result<String, SyncError> {
        let channels = match self.backend.list_channels().await {
            Ok(channels) => channels,
            Err(e) => {
                tracing::error!(channel = %channel_name, "Failed to fetch notification channels: {e}");
                Vec::new()
            }
        };

        channels
            .into_iter()
            .find(|c| c.name == channel_name)
            .map(|c| c.id)
            .ok_or_else(|| {
                tracing::warn!(channel = %channel_name, "No notification channel found");
                SyncError::ChannelNotFound {
                    monitor: monitor.to_string(),
                    channel: channel_name.to_string(),
                }
            })
    }
}
