use crate::domain::entities::existing_monitor::ExistingMonitor;
use crate::domain::errors::SyncError;
use crate::domain::ports::backend::{match_all_query, BackendGateway};

pub const DEFAULT_SEARCH_SIZE: usize = 1000;

/// Reads the set of monitors currently stored in the backend.
pub struct RemoteStateReader<'a> {
    backend: &'a dyn BackendGateway,
    search_size: usize,
}

impl<'a> RemoteStateReader<'a> {
    #[must_use]
    pub fn new(backend: &'a dyn BackendGateway, search_size: usize) -> Self {
        Self {
            backend,
            search_size,
        }
    }

    /// Snapshot of existing monitors, or the failure that prevented it.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::BackendUnavailable` if the search fails.
    pub async fn try_list_existing(&self) -> Result<Vec<ExistingMonitor>, SyncError> {
        let query = match_all_query(self.search_size);
        let monitors = self
            .backend
            .search_monitors(&query)
            .await
            .map_err(|e| SyncError::BackendUnavailable {
                operation: "listing monitors".to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!("Found {} existing monitor(s)", monitors.len());
        if monitors.len() >= self.search_size {
            tracing::warn!(
                limit = self.search_size,
                "Monitor listing hit the search size limit; some monitors may be missing"
            );
        }
        Ok(monitors)
    }

    /// Snapshot of existing monitors; a failure is logged and yields an
    /// empty list.
    pub async fn list_existing(&self) -> Vec<ExistingMonitor> {
        self.try_list_existing().await.unwrap_or_else(|e| {
            tracing::error!("Error fetching existing monitors: {e}");
            Vec::new()
        })
    }
}
