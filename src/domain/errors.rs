use serde::Serialize;
use thiserror::Error;

/// Failure recorded during a sync pass. None of these abort the pass on
/// their own; they are collected in the report.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyncError {
    #[error("desired configuration unavailable: {reason}")]
    ConfigUnavailable { reason: String },
    #[error("notification channel '{channel}' not found for monitor '{monitor}'")]
    ChannelNotFound { monitor: String, channel: String },
    #[error("backend unavailable while {operation}: {reason}")]
    BackendUnavailable { operation: String, reason: String },
    #[error("failed to create monitor '{monitor}': {reason}")]
    CreateFailed { monitor: String, reason: String },
    #[error("failed to delete monitor '{monitor}' ({id}): {reason}")]
    DeleteFailed {
        monitor: String,
        id: String,
        reason: String,
    },
}

impl SyncError {
    /// Monitor name the failure relates to, when there is one.
    #[must_use]
    pub fn monitor(&self) -> Option<&str> {
        match self {
            Self::ChannelNotFound { monitor, .. }
            | Self::CreateFailed { monitor, .. }
            | Self::DeleteFailed { monitor, .. } => Some(monitor),
            Self::ConfigUnavailable { .. } | Self::BackendUnavailable { .. } => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn sync_error_display() {
        let err = SyncError::ChannelNotFound {
            monitor: "DiskFull".into(),
            channel: "ops-slack".into(),
        };
        assert_eq!(
            err.to_string(),
            "notification channel 'ops-slack' not found for monitor 'DiskFull'"
        );

        let err = SyncError::DeleteFailed {
            monitor: "Old".into(),
            id: "m1".into(),
            reason: "HTTP 404".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to delete monitor 'Old' (m1): HTTP 404"
        );
    }

    #[test]
    fn monitor_accessor() {
        let err = SyncError::CreateFailed {
            monitor: "A".into(),
            reason: "boom".into(),
        };
        assert_eq!(err.monitor(), Some("A"));

        let err = SyncError::BackendUnavailable {
            operation: "listing monitors".into(),
            reason: "timeout".into(),
        };
        assert_eq!(err.monitor(), None);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let err = SyncError::ConfigUnavailable {
            reason: "missing".into(),
        };
        let value = serde_json::to_value(&err).expect("serialize");
        assert_eq!(value["kind"], "config_unavailable");
        assert_eq!(value["reason"], "missing");
    }
}
