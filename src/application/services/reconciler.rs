use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::channel_resolver::ChannelResolver;
use super::remote_state::{RemoteStateReader, DEFAULT_SEARCH_SIZE};
use crate::domain::builder::build_monitor_document;
use crate::domain::entities::monitor_spec::MonitorSpec;
use crate::domain::errors::SyncError;
use crate::domain::plan::{PlannedDeletion, SyncPlan};
use crate::domain::ports::backend::BackendGateway;

/// What to do when the existing monitors cannot be listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadFailurePolicy {
    /// Continue with an empty snapshot and record the failure.
    #[default]
    Absorb,
    /// Stop before any write.
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedMonitor {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedMonitor {
    pub name: Option<String>,
    pub id: String,
}

/// Outcome of one sync pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub created: Vec<CreatedMonitor>,
    pub deleted: Vec<DeletedMonitor>,
    pub unchanged: Vec<String>,
    pub reserved: Vec<String>,
    pub failures: Vec<SyncError>,
}

impl SyncReport {
    fn begin() -> Self {
        let now = Utc::now();
        Self {
            started_at: now,
            finished_at: now,
            created: Vec::new(),
            deleted: Vec::new(),
            unchanged: Vec::new(),
            reserved: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// True when every planned operation succeeded.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.failures.is_empty()
    }

    #[must_use]
    pub fn writes(&self) -> usize {
        self.created.len() + self.deleted.len()
    }
}

/// Drives a backend toward the desired monitor set: create what is missing,
/// delete what is orphaned, leave the rest alone.
///
/// Work is strictly sequential and best-effort: a failure on one monitor is
/// recorded and the pass moves on to the next name.
pub struct Reconciler<'a> {
    backend: &'a dyn BackendGateway,
    search_size: usize,
    read_failure_policy: ReadFailurePolicy,
    reserved_names: Vec<String>,
}

impl<'a> Reconciler<'a> {
    #[must_use]
    pub fn new(backend: &'a dyn BackendGateway) -> Self {
        Self {
            backend,
            search_size: DEFAULT_SEARCH_SIZE,
            read_failure_policy: ReadFailurePolicy::default(),
            reserved_names: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_search_size(mut self, search_size: usize) -> Self {
        self.search_size = search_size;
        self
    }

    #[must_use]
    pub const fn with_read_failure_policy(mut self, policy: ReadFailurePolicy) -> Self {
        self.read_failure_policy = policy;
        self
    }

    /// Names that must never be deleted during this pass.
    #[must_use]
    pub fn with_reserved_names(mut self, names: Vec<String>) -> Self {
        self.reserved_names = names;
        self
    }

    /// Computes the diff without writing anything.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::BackendUnavailable` if listing fails and the
    /// policy is `Abort`.
    pub async fn plan(&self, desired: &[MonitorSpec]) -> Result<SyncPlan, SyncError> {
        let (plan, _) = self.snapshot_plan(desired).await?;
        Ok(plan)
    }

    /// Runs one sync pass.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::BackendUnavailable` only when listing the existing
    /// monitors fails under `ReadFailurePolicy::Abort`. Every other failure
    /// is recorded in the report.
    pub async fn reconcile(&self, desired: &[MonitorSpec]) -> Result<SyncReport, SyncError> {
        let mut report = SyncReport::begin();

        let (plan, read_failure) = self.snapshot_plan(desired).await?;
        report.failures.extend(read_failure);
        report.unchanged.clone_from(&plan.unchanged);
        report.reserved.clone_from(&plan.reserved);

        for name in &plan.unchanged {
            tracing::debug!(monitor = %name, "Monitor already present, left untouched");
        }

        for spec in &plan.to_create {
            tracing::debug!(monitor = %spec.name, "Creating monitor");
            match self.create(spec).await {
                Ok(created) => report.created.push(created),
                Err(e) => {
                    tracing::error!(monitor = %spec.name, "{e}");
                    report.failures.push(e);
                }
            }
        }

        for orphan in &plan.to_delete {
            tracing::debug!(monitor = %orphan.display_name(), id = %orphan.id, "Deleting orphaned monitor");
            match self.delete(orphan).await {
                Ok(deleted) => report.deleted.push(deleted),
                Err(e) => {
                    tracing::error!(id = %orphan.id, "{e}");
                    report.failures.push(e);
                }
            }
        }

        report.finished_at = Utc::now();
        tracing::info!(
            created = report.created.len(),
            deleted = report.deleted.len(),
            unchanged = report.unchanged.len(),
            failures = report.failures.len(),
            "Sync pass finished"
        );
        Ok(report)
    }

    async fn snapshot_plan(
        &self,
        desired: &[MonitorSpec],
    ) -> Result<(SyncPlan, Option<SyncError>), SyncError> {
        let reader = RemoteStateReader::new(self.backend, self.search_size);
        let (existing, read_failure) = match reader.try_list_existing().await {
            Ok(existing) => (existing, None),
            Err(e) => match self.read_failure_policy {
                ReadFailurePolicy::Abort => return Err(e),
                ReadFailurePolicy::Absorb => {
                    tracing::error!("{e}; continuing with an empty snapshot");
                    (Vec::new(), Some(e))
                }
            },
        };

        let plan = SyncPlan::compute(desired, &existing, &self.reserved_names);
        Ok((plan, read_failure))
    }

    async fn create(&self, spec: &MonitorSpec) -> Result<CreatedMonitor, SyncError> {
        let channel_id = ChannelResolver::new(self.backend)
            .resolve(&spec.name, &spec.channel_name)
            .await?;

        let document = build_monitor_document(spec, &channel_id);
        if let Ok(hash) = document.content_hash() {
            tracing::debug!(monitor = %spec.name, %hash, "Built monitor document");
        }

        let id = self
            .backend
            .create_monitor(&document)
            .await
            .map_err(|e| SyncError::CreateFailed {
                monitor: spec.name.clone(),
                reason: e.to_string(),
            })?;

        tracing::info!(monitor = %spec.name, %id, "Created monitor");
        Ok(CreatedMonitor {
            name: spec.name.clone(),
            id,
        })
    }

    async fn delete(&self, orphan: &PlannedDeletion) -> Result<DeletedMonitor, SyncError> {
        self.backend
            .delete_monitor(&orphan.id)
            .await
            .map_err(|e| SyncError::DeleteFailed {
                monitor: orphan.display_name().to_string(),
                id: orphan.id.clone(),
                reason: e.to_string(),
            })?;

        tracing::info!(monitor = %orphan.display_name(), id = %orphan.id, "Deleted monitor");
        Ok(DeletedMonitor {
            name: orphan.name.clone(),
            id: orphan.id.clone(),
        })
    }
}
