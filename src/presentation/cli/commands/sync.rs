use serde::Serialize;

use crate::application::services::reconciler::{ReadFailurePolicy, Reconciler, SyncReport};
use crate::application::services::remote_state::RemoteStateReader;
use crate::domain::entities::existing_monitor::ExistingMonitor;
use crate::domain::entities::monitor_spec::DesiredSet;
use crate::domain::errors::SyncError;
use crate::domain::plan::SyncPlan;
use crate::domain::ports::backend::BackendGateway;
use crate::domain::ports::config_source::ConfigSource;
use crate::presentation::cli::formatters::monitor_fmt::{format_desired_set, format_monitor_table};
use crate::presentation::cli::formatters::report_fmt::{format_plan, format_report};
use crate::presentation::cli::formatters::status_fmt::{
    fail_marker, ok_marker, print_section_header,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    pub dry_run: bool,
    pub strict: bool,
    pub json: bool,
    pub search_size: usize,
}

#[derive(Serialize)]
struct SyncOutput<'a> {
    report: &'a SyncReport,
    monitors: &'a [ExistingMonitor],
}

/// Loads the desired monitors and reconciles the backend against them.
///
/// An unavailable or empty desired set ends the run before the backend is
/// contacted.
///
/// # Errors
///
/// Returns an error if listing existing monitors fails in strict mode, or if
/// JSON serialization fails.
pub async fn run_sync(
    source: &dyn ConfigSource,
    backend: &dyn BackendGateway,
    options: SyncOptions,
) -> anyhow::Result<()> {
    let Some(desired) = load_desired(source, options.json).await else {
        return Ok(());
    };

    if !options.json {
        print_section_header(&format!("📄 Desired monitors ({})", source.describe()));
        print!("{}", format_desired_set(&desired));
    }

    match backend.info().await {
        Ok(info) => {
            tracing::info!(cluster = %info.cluster_name, version = %info.version, "Connected");
            if !options.json {
                println!("{} Connected to {info}\n", ok_marker());
            }
        }
        Err(e) => {
            tracing::warn!("Cannot confirm backend connection: {e}");
            if !options.json {
                println!("{} Cannot confirm backend connection: {e}\n", fail_marker());
            }
        }
    }

    let policy = if options.strict {
        ReadFailurePolicy::Abort
    } else {
        ReadFailurePolicy::Absorb
    };
    let reconciler = Reconciler::new(backend)
        .with_search_size(options.search_size)
        .with_read_failure_policy(policy)
        .with_reserved_names(desired.reserved_names());

    if options.dry_run {
        let plan = reconciler.plan(&desired.monitors).await?;
        print_plan(&plan, options.json)?;
        return Ok(());
    }

    let report = reconciler.reconcile(&desired.monitors).await?;
    let monitors = RemoteStateReader::new(backend, options.search_size)
        .list_existing()
        .await;

    if options.json {
        let output = SyncOutput {
            report: &report,
            monitors: &monitors,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_section_header("🔄 Sync");
        println!("{}\n", format_report(&report));
        print_section_header(&format!("📋 Monitors in cluster ({})", monitors.len()));
        println!("{}", format_monitor_table(&monitors));
    }

    Ok(())
}

async fn load_desired(source: &dyn ConfigSource, json: bool) -> Option<DesiredSet> {
    let desired = match source.load_desired_monitors().await {
        Ok(desired) => desired,
        Err(e) => {
            let failure = SyncError::ConfigUnavailable {
                reason: e.to_string(),
            };
            tracing::error!(source = %source.describe(), "{failure}");
            if !json {
                println!("{} {failure}", fail_marker());
            }
            return None;
        }
    };

    if desired.is_empty() {
        tracing::warn!(
            source = %source.describe(),
            rejected = desired.rejected.len(),
            "No valid monitors in configuration, nothing to sync"
        );
        if !json {
            println!("{} No valid monitors to sync; exiting.", fail_marker());
        }
        return None;
    }

    Some(desired)
}

fn print_plan(plan: &SyncPlan, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(plan)?);
    } else {
        print_section_header("🧪 Dry run");
        println!("{}", format_plan(plan));
    }
    Ok(())
}
