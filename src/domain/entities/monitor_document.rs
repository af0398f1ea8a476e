use serde::{Deserialize, Serialize};
use serde_json::Value;

/// OpenSearch Alerting query-level monitor, ready to be sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorDocument {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub enabled: bool,
    pub schedule: Schedule,
    pub inputs: Vec<MonitorInput>,
    pub triggers: Vec<Trigger>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub period: Period,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub interval: u32,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorInput {
    pub search: SearchInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchInput {
    pub indices: Vec<String>,
    pub query: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    pub name: String,
    pub severity: String,
    pub condition: Condition,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub script: Script,
}

/// Source text plus the language the backend evaluates it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub source: String,
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub destination_id: String,
    pub message_template: Script,
    pub throttle_enabled: bool,
}

impl MonitorDocument {
    /// Stable blake3 digest of the serialized document, hex encoded.
    ///
    /// Two documents built from identical inputs share a hash; any change in
    /// schedule, query, trigger or destination produces a different one.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized.
    pub fn content_hash(&self) -> Result<String, serde_json::Error> {
        let mut hasher = blake3::Hasher::new();
        serde_json::to_writer(&mut hasher, self)?;
        Ok(hasher.finalize().to_hex().to_string())
    }

    /// Destination ids referenced by every trigger action.
    pub fn destination_ids(&self) -> impl Iterator<Item = &str> {
        self.triggers
            .iter()
            .flat_map(|t| t.actions.iter())
            .map(|a| a.destination_id.as_str())
    }
}
