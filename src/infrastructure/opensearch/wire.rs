//! Response bodies of the OpenSearch endpoints the gateway calls.

use serde::Deserialize;

use crate::domain::entities::channel::ChannelRecord;
use crate::domain::entities::cluster_info::ClusterInfo;
use crate::domain::entities::existing_monitor::ExistingMonitor;

/// `GET /_plugins/_notifications/channels`
#[derive(Debug, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub channel_list: Vec<ChannelEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelEntry {
    pub config_id: Option<String>,
    pub name: Option<String>,
}

impl ChannelListResponse {
    /// Entries missing a name or an id can never be resolved and are dropped.
    #[must_use]
    pub fn into_records(self) -> Vec<ChannelRecord> {
        self.channel_list
            .into_iter()
            .filter_map(|entry| match (entry.name, entry.config_id) {
                (Some(name), Some(id)) => Some(ChannelRecord { name, id }),
                (name, _) => {
                    tracing::debug!(?name, "Skipping incomplete channel entry");
                    None
                }
            })
            .collect()
    }
}

/// `POST /_plugins/_alerting/monitors/_search`
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: SearchHits,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchHits {
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_source", default)]
    pub source: MonitorSource,
}

#[derive(Debug, Default, Deserialize)]
pub struct MonitorSource {
    pub name: Option<String>,
}

impl SearchResponse {
    #[must_use]
    pub fn into_monitors(self) -> Vec<ExistingMonitor> {
        self.hits
            .hits
            .into_iter()
            .map(|hit| ExistingMonitor {
                id: hit.id,
                name: hit.source.name,
            })
            .collect()
    }
}

/// `POST /_plugins/_alerting/monitors`
#[derive(Debug, Deserialize)]
pub struct CreateResponse {
    #[serde(rename = "_id")]
    pub id: String,
}

/// `GET /`
#[derive(Debug, Deserialize)]
pub struct InfoResponse {
    pub cluster_name: String,
    pub version: VersionInfo,
}

#[derive(Debug, Deserialize)]
pub struct VersionInfo {
    pub number: String,
}

impl From<InfoResponse> for ClusterInfo {
    fn from(info: InfoResponse) -> Self {
        Self {
            cluster_name: info.cluster_name,
            version: info.version.number,
        }
    }
}
