use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

use crate::domain::entities::channel::ChannelRecord;
use crate::domain::entities::cluster_info::ClusterInfo;
use crate::domain::entities::existing_monitor::ExistingMonitor;
use crate::domain::entities::monitor_document::MonitorDocument;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("backend unreachable: {0}")]
    Transport(String),
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response from backend: {0}")]
    InvalidResponse(String),
}

/// Match-all monitor search, capped at `size` hits.
#[must_use]
pub fn match_all_query(size: usize) -> Value {
    json!({
        "size": size,
        "query": { "match_all": {} }
    })
}

/// Operations the reconciler needs from the monitoring backend.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// List every notification channel registered with the backend.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails or the response is invalid.
    async fn list_channels(&self) -> Result<Vec<ChannelRecord>, BackendError>;

    /// Search the monitor store with a raw query body.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails or the response is invalid.
    async fn search_monitors(&self, query: &Value) -> Result<Vec<ExistingMonitor>, BackendError>;

    /// Create a monitor and return the id the backend assigned to it.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the backend rejects the document.
    async fn create_monitor(&self, document: &MonitorDocument) -> Result<String, BackendError>;

    /// Delete the monitor with the given id.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails or the id is unknown.
    async fn delete_monitor(&self, id: &str) -> Result<(), BackendError>;

    /// Cluster name and version, used to confirm the connection.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails or the response is invalid.
    async fn info(&self) -> Result<ClusterInfo, BackendError>;
}
