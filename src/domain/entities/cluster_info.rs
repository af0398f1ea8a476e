use serde::{Deserialize, Serialize};

/// Identity of the backend cluster, used to confirm the connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterInfo {
    pub cluster_name: String,
    pub version: String,
}

impl std::fmt::Display for ClusterInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OpenSearch {} @ {}", self.version, self.cluster_name)
    }
}
