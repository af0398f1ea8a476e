#![allow(clippy::expect_used)]

use monsync::application::services::reconciler::{ReadFailurePolicy, Reconciler};
use monsync::domain::entities::{ChannelRecord, DesiredSet, ExistingMonitor, MonitorSpec};
use monsync::domain::errors::SyncError;
use monsync::domain::value_objects::TimeWindow;
use monsync::infrastructure::config_source::parse_document;
use monsync::infrastructure::memory::in_memory_backend::{InMemoryBackend, Operation};

// ---------------------------------------------------------------------------
// Fixture loader
// ---------------------------------------------------------------------------

fn load_fixture(name: &str) -> DesiredSet {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let bytes = std::fs::read(&path).expect("Failed to read fixture");
    parse_document(&bytes).expect("Failed to parse fixture")
}

fn spec(name: &str, channel: &str) -> MonitorSpec {
    MonitorSpec {
        name: name.to_string(),
        index: "logs-*".to_string(),
        keyword: "error".to_string(),
        time_window: TimeWindow::from_minutes(5).expect("window"),
        channel_name: channel.to_string(),
    }
}

fn channels() -> Vec<ChannelRecord> {
    vec![
        ChannelRecord::new("ops-slack", "c42"),
        ChannelRecord::new("payments-oncall", "c77"),
    ]
}

fn writes(backend: &InMemoryBackend) -> usize {
    backend
        .operations()
        .iter()
        .filter(|op| matches!(op, Operation::Create(_) | Operation::Delete(_)))
        .count()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn disk_full_scenario_creates_and_deletes() {
    let backend = InMemoryBackend::new()
        .with_channels(vec![ChannelRecord::new("ops-slack", "c42")])
        .with_monitors(vec![ExistingMonitor::new("m1", "OldCheck")]);
    let desired = vec![MonitorSpec {
        name: "DiskFull".into(),
        index: "logs-*".into(),
        keyword: "disk full".into(),
        time_window: TimeWindow::from_minutes(5).expect("window"),
        channel_name: "ops-slack".into(),
    }];

    let report = Reconciler::new(&backend)
        .reconcile(&desired)
        .await
        .expect("reconcile");

    let created = backend.created_documents();
    assert_eq!(created.len(), 1);
    let doc = &created[0];
    assert_eq!(doc.name, "DiskFull");
    assert_eq!(doc.schedule.period.interval, 5);
    assert_eq!(doc.inputs[0].search.indices, vec!["logs-*".to_string()]);
    assert_eq!(
        doc.inputs[0].search.query["query"]["bool"]["must"][0]["match_phrase"]["message"],
        "disk full"
    );
    assert_eq!(doc.destination_ids().collect::<Vec<_>>(), vec!["c42"]);

    assert_eq!(backend.deleted_ids(), vec!["m1".to_string()]);
    assert!(report.is_converged());
    assert_eq!(backend.monitor_names(), vec!["DiskFull".to_string()]);
}

#[tokio::test]
async fn second_pass_is_idempotent() {
    let backend = InMemoryBackend::new()
        .with_channels(channels())
        .with_monitors(vec![ExistingMonitor::new("m1", "Stale")]);
    let desired = vec![spec("A", "ops-slack"), spec("B", "payments-oncall")];
    let reconciler = Reconciler::new(&backend);

    let first = reconciler.reconcile(&desired).await.expect("first pass");
    assert_eq!(first.writes(), 3);
    let writes_after_first = writes(&backend);

    let second = reconciler.reconcile(&desired).await.expect("second pass");
    assert_eq!(second.writes(), 0);
    assert_eq!(second.unchanged, vec!["A".to_string(), "B".to_string()]);
    assert_eq!(writes(&backend), writes_after_first);
}

#[tokio::test]
async fn diff_is_independent_of_order() {
    let existing = vec![
        ExistingMonitor::new("m1", "Keep"),
        ExistingMonitor::new("m2", "Drop1"),
        ExistingMonitor::new("m3", "Drop2"),
    ];
    let desired = vec![spec("New", "ops-slack"), spec("Keep", "ops-slack")];

    let forward = InMemoryBackend::new()
        .with_channels(channels())
        .with_monitors(existing.clone());
    Reconciler::new(&forward)
        .reconcile(&desired)
        .await
        .expect("forward");

    let mut reversed_existing = existing;
    reversed_existing.reverse();
    let mut reversed_desired = desired;
    reversed_desired.reverse();
    let backward = InMemoryBackend::new()
        .with_channels(channels())
        .with_monitors(reversed_existing);
    Reconciler::new(&backward)
        .reconcile(&reversed_desired)
        .await
        .expect("backward");

    let mut forward_deleted = forward.deleted_ids();
    forward_deleted.sort();
    let mut backward_deleted = backward.deleted_ids();
    backward_deleted.sort();
    assert_eq!(forward_deleted, vec!["m2".to_string(), "m3".to_string()]);
    assert_eq!(forward_deleted, backward_deleted);
    assert_eq!(forward.monitor_names(), backward.monitor_names());
}

#[tokio::test]
async fn matching_names_are_never_updated() {
    let backend = InMemoryBackend::new()
        .with_channels(channels())
        .with_monitors(vec![ExistingMonitor::new("m1", "A")]);
    // Same name, entirely different definition.
    let desired = vec![MonitorSpec {
        name: "A".into(),
        index: "other-*".into(),
        keyword: "something else".into(),
        time_window: TimeWindow::from_minutes(60).expect("window"),
        channel_name: "payments-oncall".into(),
    }];

    let report = Reconciler::new(&backend)
        .reconcile(&desired)
        .await
        .expect("reconcile");

    assert_eq!(report.writes(), 0);
    assert_eq!(report.unchanged, vec!["A".to_string()]);
    assert_eq!(
        backend.operations(),
        vec![Operation::Search],
        "only the listing call should reach the backend"
    );
}

#[tokio::test]
async fn failed_create_does_not_block_the_next_one() {
    let backend = InMemoryBackend::new().with_channels(channels());
    backend.fail_create_for("A");

    let report = Reconciler::new(&backend)
        .reconcile(&[spec("A", "ops-slack"), spec("B", "ops-slack")])
        .await
        .expect("reconcile");

    assert_eq!(backend.monitor_names(), vec!["B".to_string()]);
    assert!(matches!(
        report.failures.as_slice(),
        [SyncError::CreateFailed { monitor, .. }] if monitor == "A"
    ));
}

#[tokio::test]
async fn failed_delete_does_not_block_the_next_one() {
    let backend = InMemoryBackend::new().with_monitors(vec![
        ExistingMonitor::new("m1", "X"),
        ExistingMonitor::new("m2", "Y"),
    ]);
    backend.fail_delete_for("m1");

    let report = Reconciler::new(&backend)
        .reconcile(&[])
        .await
        .expect("reconcile");

    assert_eq!(backend.deleted_ids(), vec!["m2".to_string()]);
    assert!(matches!(
        report.failures.as_slice(),
        [SyncError::DeleteFailed { id, .. }] if id == "m1"
    ));
}

#[tokio::test]
async fn unknown_channel_is_never_sent_to_create() {
    let backend = InMemoryBackend::new().with_channels(channels());

    let report = Reconciler::new(&backend)
        .reconcile(&[spec("A", "nonexistent")])
        .await
        .expect("reconcile");

    assert!(!backend
        .operations()
        .iter()
        .any(|op| matches!(op, Operation::Create(_))));
    assert!(matches!(
        report.failures.as_slice(),
        [SyncError::ChannelNotFound { channel, .. }] if channel == "nonexistent"
    ));
}

#[tokio::test]
async fn channel_listing_failure_skips_every_create() {
    let backend = InMemoryBackend::new().with_channels(channels());
    backend.fail_list_channels(true);

    let report = Reconciler::new(&backend)
        .reconcile(&[spec("A", "ops-slack"), spec("B", "ops-slack")])
        .await
        .expect("reconcile");

    assert!(backend.created_documents().is_empty());
    assert_eq!(report.failures.len(), 2);
}

#[tokio::test]
async fn strict_policy_performs_no_writes_when_listing_fails() {
    let backend = InMemoryBackend::new()
        .with_channels(channels())
        .with_monitors(vec![ExistingMonitor::new("m1", "Stale")]);
    backend.fail_search(true);

    let result = Reconciler::new(&backend)
        .with_read_failure_policy(ReadFailurePolicy::Abort)
        .reconcile(&[spec("A", "ops-slack")])
        .await;

    assert!(matches!(result, Err(SyncError::BackendUnavailable { .. })));
    assert_eq!(writes(&backend), 0);
}

// ---------------------------------------------------------------------------
// Fixture-driven
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rejected_fixture_entry_keeps_its_remote_monitor() {
    let desired = load_fixture("monitors.json");
    assert_eq!(desired.monitors.len(), 3);
    assert_eq!(desired.reserved_names(), vec!["LegacyHourly".to_string()]);

    let backend = InMemoryBackend::new()
        .with_channels(channels())
        .with_monitors(vec![
            ExistingMonitor::new("m1", "DiskFull"),
            ExistingMonitor::new("m2", "LegacyHourly"),
            ExistingMonitor::new("m3", "Retired"),
            ExistingMonitor::unnamed("m4"),
        ]);

    let report = Reconciler::new(&backend)
        .with_reserved_names(desired.reserved_names())
        .reconcile(&desired.monitors)
        .await
        .expect("reconcile");

    let mut deleted = backend.deleted_ids();
    deleted.sort();
    assert_eq!(deleted, vec!["m3".to_string(), "m4".to_string()]);
    assert_eq!(report.reserved, vec!["LegacyHourly".to_string()]);
    assert_eq!(
        backend.monitor_names(),
        vec![
            "DiskFull".to_string(),
            "LegacyHourly".to_string(),
            "OutOfMemory".to_string(),
            "PaymentTimeouts".to_string(),
        ]
    );
    assert!(report.is_converged());
}

#[tokio::test]
async fn fixture_documents_reference_resolved_channels() {
    let desired = load_fixture("monitors.json");
    let backend = InMemoryBackend::new().with_channels(channels());

    Reconciler::new(&backend)
        .reconcile(&desired.monitors)
        .await
        .expect("reconcile");

    for doc in backend.created_documents() {
        let expected = if doc.name == "PaymentTimeouts" {
            "c77"
        } else {
            "c42"
        };
        assert_eq!(doc.destination_ids().collect::<Vec<_>>(), vec![expected]);
    }
}
