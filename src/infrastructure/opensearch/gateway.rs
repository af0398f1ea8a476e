use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::wire::{ChannelListResponse, CreateResponse, InfoResponse, SearchResponse};
use crate::application::config::BackendConfig;
use crate::domain::entities::channel::ChannelRecord;
use crate::domain::entities::cluster_info::ClusterInfo;
use crate::domain::entities::existing_monitor::ExistingMonitor;
use crate::domain::entities::monitor_document::MonitorDocument;
use crate::domain::ports::backend::{BackendError, BackendGateway};

const CHANNELS_PATH: &str = "/_plugins/_notifications/channels";
const MONITORS_PATH: &str = "/_plugins/_alerting/monitors";

/// Longest slice of an error body kept in `BackendError::Status`.
const MAX_ERROR_BODY: usize = 512;

/// Talks to the OpenSearch Alerting and Notifications plugins over HTTP(S)
/// with basic auth.
pub struct OpenSearchGateway {
    base_url: String,
    username: String,
    password: String,
    client: reqwest::Client,
}

impl OpenSearchGateway {
    /// Builds the HTTP client from `config`.
    ///
    /// Certificates are only verified when `config.verify_certs` is set.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Transport` if the HTTP client cannot be
    /// initialized (e.g. TLS backend failure).
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        if config.use_tls && !config.verify_certs {
            tracing::warn!(
                host = %config.host,
                "TLS certificate verification is disabled for the backend connection"
            );
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(!config.verify_certs)
            .build()
            .map_err(|e| BackendError::Transport(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url(),
            username: config.username.clone(),
            password: config.password.clone(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// `MONITORS_PATH/{id}` with `id` percent-encoded as a single segment.
    fn monitor_url(&self, id: &str) -> Result<Url, BackendError> {
        let mut url = Url::parse(&self.url(MONITORS_PATH))
            .map_err(|e| BackendError::Transport(format!("invalid backend URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| BackendError::Transport("backend URL cannot carry a path".into()))?
            .push(id);
        Ok(url)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.authorize(self.client.request(method, self.url(path)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.username, Some(&self.password))
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(BackendError::Status {
            status: status.as_u16(),
            body: truncate(&body, MAX_ERROR_BODY),
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, BackendError> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}

fn truncate(body: &str, max: usize) -> String {
    if body.len() <= max {
        return body.to_string();
    }
    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[async_trait]
impl BackendGateway for OpenSearchGateway {
    async fn list_channels(&self) -> Result<Vec<ChannelRecord>, BackendError> {
        let response: ChannelListResponse =
            self.send_json(self.request(Method::GET, CHANNELS_PATH)).await?;
        Ok(response.into_records())
    }

    async fn search_monitors(&self, query: &Value) -> Result<Vec<ExistingMonitor>, BackendError> {
        let request = self
            .request(Method::POST, &format!("{MONITORS_PATH}/_search"))
            .json(query);
        let response: SearchResponse = self.send_json(request).await?;
        Ok(response.into_monitors())
    }

    async fn create_monitor(&self, document: &MonitorDocument) -> Result<String, BackendError> {
        let request = self.request(Method::POST, MONITORS_PATH).json(document);
        let response: CreateResponse = self.send_json(request).await?;
        Ok(response.id)
    }

    async fn delete_monitor(&self, id: &str) -> Result<(), BackendError> {
        let request = self.authorize(self.client.delete(self.monitor_url(id)?));
        self.send(request).await?;
        Ok(())
    }

    async fn info(&self) -> Result<ClusterInfo, BackendError> {
        let response: InfoResponse = self.send_json(self.request(Method::GET, "/")).await?;
        Ok(response.into())
    }
}
