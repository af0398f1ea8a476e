use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::value_objects::time_window::{TimeWindow, TimeWindowError};

/// A monitor that should exist in the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorSpec {
    pub name: String,
    pub index: String,
    pub keyword: String,
    pub time_window: TimeWindow,
    pub channel_name: String,
}

/// One entry of the desired-configuration document, as written by users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorRecord {
    #[serde(rename = "Monitor_Name")]
    pub monitor_name: String,
    #[serde(rename = "Index")]
    pub index: String,
    #[serde(rename = "Text2Scan_in_Message")]
    pub text_to_scan: String,
    #[serde(rename = "Time2Scan")]
    pub time_to_scan: String,
    #[serde(rename = "notification_channel")]
    pub notification_channel: String,
}

/// Top-level desired-configuration document.
///
/// Entries stay raw JSON until [`DesiredSet::from`] validates them one by
/// one, so a single bad entry cannot take the rest of the document down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorsDocument {
    #[serde(rename = "Monitors", default)]
    pub monitors: Vec<Value>,
}

impl TryFrom<MonitorRecord> for MonitorSpec {
    type Error = TimeWindowError;

    fn try_from(record: MonitorRecord) -> Result<Self, Self::Error> {
        let time_window = record.time_to_scan.parse()?;
        Ok(Self {
            name: record.monitor_name,
            index: record.index,
            keyword: record.text_to_scan,
            time_window,
            channel_name: record.notification_channel,
        })
    }
}

/// A desired entry that failed validation. Its name stays reserved so the
/// matching remote monitor is not treated as orphaned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedMonitor {
    pub name: String,
    pub reason: String,
}

/// Validated desired monitors plus the entries that were rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DesiredSet {
    pub monitors: Vec<MonitorSpec>,
    pub rejected: Vec<RejectedMonitor>,
}

impl DesiredSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    #[must_use]
    pub fn reserved_names(&self) -> Vec<String> {
        self.rejected.iter().map(|r| r.name.clone()).collect()
    }
}

impl From<MonitorsDocument> for DesiredSet {
    fn from(document: MonitorsDocument) -> Self {
        let mut set = Self::default();
        for (position, entry) in document.monitors.into_iter().enumerate() {
            let name = entry
                .get("Monitor_Name")
                .and_then(Value::as_str)
                .map(str::to_string);

            match validate_entry(entry) {
                Ok(spec) => set.monitors.push(spec),
                Err(reason) => match name {
                    Some(name) => {
                        tracing::error!(monitor = %name, "Rejected monitor definition: {reason}");
                        set.rejected.push(RejectedMonitor { name, reason });
                    }
                    None => {
                        tracing::error!(position, "Skipping monitor entry without a name: {reason}");
                    }
                },
            }
        }
        set
    }
}

fn validate_entry(entry: Value) -> Result<MonitorSpec, String> {
    let record: MonitorRecord = serde_json::from_value(entry).map_err(|e| e.to_string())?;
    MonitorSpec::try_from(record).map_err(|e| e.to_string())
}
