use serde_json::json;

use crate::domain::entities::monitor_document::{
    Action, Condition, MonitorDocument, MonitorInput, Period, Schedule, Script, SearchInput,
    Trigger,
};
use crate::domain::entities::monitor_spec::MonitorSpec;

pub const SCHEDULE_UNIT: &str = "MINUTES";
pub const TRIGGER_SEVERITY: &str = "1";
pub const ACTION_NAME: &str = "Slack Notification";

/// Fires when the monitor's search matched at least one document.
pub const HIT_CONDITION: &str = "ctx.results[0].hits.total.value > 0";

/// Mustache template; the `ctx.*` placeholders are filled by the backend when
/// the trigger fires.
pub const MESSAGE_TEMPLATE: &str = "\u{1F6A8} Monitor {{ctx.monitor.name}} just entered an alert state. Please investigate the issue.\n\
- Trigger: {{ctx.trigger.name}}\n\
- Severity: {{ctx.trigger.severity}}\n\
- Period start: {{ctx.periodStart}}\n\
- Period end: {{ctx.periodEnd}}";

#[must_use]
pub fn trigger_name(monitor_name: &str) -> String {
    format!("{monitor_name} Trigger")
}

/// Builds the backend-native monitor for `spec`, notifying `channel_id`.
#[must_use]
pub fn build_monitor_document(spec: &MonitorSpec, channel_id: &str) -> MonitorDocument {
    let query = json!({
        "size": 0,
        "query": {
            "bool": {
                "must": [
                    { "match_phrase": { "message": spec.keyword } }
                ]
            }
        }
    });

    let action = Action {
        name: ACTION_NAME.to_string(),
        destination_id: channel_id.to_string(),
        message_template: Script {
            source: MESSAGE_TEMPLATE.to_string(),
            lang: "mustache".to_string(),
        },
        throttle_enabled: false,
    };

    let trigger = Trigger {
        name: trigger_name(&spec.name),
        severity: TRIGGER_SEVERITY.to_string(),
        condition: Condition {
            script: Script {
                source: HIT_CONDITION.to_string(),
                lang: "painless".to_string(),
            },
        },
        actions: vec![action],
    };

    MonitorDocument {
        kind: "monitor".to_string(),
        name: spec.name.clone(),
        enabled: true,
        schedule: Schedule {
            period: Period {
                interval: spec.time_window.minutes(),
                unit: SCHEDULE_UNIT.to_string(),
            },
        },
        inputs: vec![MonitorInput {
            search: SearchInput {
                indices: vec![spec.index.clone()],
                query,
            },
        }],
        triggers: vec![trigger],
    }
}
