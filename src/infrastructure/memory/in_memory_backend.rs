use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::entities::channel::ChannelRecord;
use crate::domain::entities::cluster_info::ClusterInfo;
use crate::domain::entities::existing_monitor::ExistingMonitor;
use crate::domain::entities::monitor_document::MonitorDocument;
use crate::domain::ports::backend::{BackendError, BackendGateway};

/// A call received by [`InMemoryBackend`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListChannels,
    Search,
    Create(String),
    Delete(String),
    Info,
}

#[derive(Default)]
struct State {
    channels: Vec<ChannelRecord>,
    monitors: Vec<ExistingMonitor>,
    created: Vec<MonitorDocument>,
    deleted: Vec<String>,
    operations: Vec<Operation>,
    next_id: u64,
}

/// In-memory backend for testing purposes.
///
/// Holds channels and monitors, records every call, and can be told to fail
/// specific operations.
pub struct InMemoryBackend {
    state: Mutex<State>,
    fail_list_channels: AtomicBool,
    fail_search: AtomicBool,
    fail_create: Mutex<HashSet<String>>,
    fail_delete: Mutex<HashSet<String>>,
}

fn poisoned() -> BackendError {
    BackendError::Transport("lock poisoned".into())
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            fail_list_channels: AtomicBool::new(false),
            fail_search: AtomicBool::new(false),
            fail_create: Mutex::new(HashSet::new()),
            fail_delete: Mutex::new(HashSet::new()),
        }
    }

    #[must_use]
    pub fn with_channels(self, channels: Vec<ChannelRecord>) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.channels = channels;
        }
        self
    }

    #[must_use]
    pub fn with_monitors(self, monitors: Vec<ExistingMonitor>) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.monitors = monitors;
        }
        self
    }

    pub fn fail_list_channels(&self, fail: bool) {
        self.fail_list_channels.store(fail, Ordering::SeqCst);
    }

    pub fn fail_search(&self, fail: bool) {
        self.fail_search.store(fail, Ordering::SeqCst);
    }

    /// Make `create_monitor` fail for documents with this name.
    pub fn fail_create_for(&self, name: &str) {
        if let Ok(mut names) = self.fail_create.lock() {
            names.insert(name.to_string());
        }
    }

    /// Make `delete_monitor` fail for this id.
    pub fn fail_delete_for(&self, id: &str) {
        if let Ok(mut ids) = self.fail_delete.lock() {
            ids.insert(id.to_string());
        }
    }

    #[must_use]
    pub fn operations(&self) -> Vec<Operation> {
        self.state
            .lock()
            .map(|s| s.operations.clone())
            .unwrap_or_default()
    }

    /// Documents accepted by `create_monitor`.
    #[must_use]
    pub fn created_documents(&self) -> Vec<MonitorDocument> {
        self.state
            .lock()
            .map(|s| s.created.clone())
            .unwrap_or_default()
    }

    /// Ids removed by `delete_monitor`.
    #[must_use]
    pub fn deleted_ids(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|s| s.deleted.clone())
            .unwrap_or_default()
    }

    /// Names of the monitors currently stored, sorted.
    #[must_use]
    pub fn monitor_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .state
            .lock()
            .map(|s| s.monitors.iter().filter_map(|m| m.name.clone()).collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    fn record(&self, op: Operation) -> Result<(), BackendError> {
        self.state.lock().map_err(|_| poisoned())?.operations.push(op);
        Ok(())
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackendGateway for InMemoryBackend {
    async fn list_channels(&self) -> Result<Vec<ChannelRecord>, BackendError> {
        self.record(Operation::ListChannels)?;
        if self.fail_list_channels.load(Ordering::SeqCst) {
            return Err(BackendError::Transport("channel registry unavailable".into()));
        }
        Ok(self.state.lock().map_err(|_| poisoned())?.channels.clone())
    }

    async fn search_monitors(&self, query: &Value) -> Result<Vec<ExistingMonitor>, BackendError> {
        self.record(Operation::Search)?;
        if self.fail_search.load(Ordering::SeqCst) {
            return Err(BackendError::Transport("search unavailable".into()));
        }
        let size = query["size"]
            .as_u64()
            .and_then(|s| usize::try_from(s).ok())
            .unwrap_or(usize::MAX);
        let state = self.state.lock().map_err(|_| poisoned())?;
        Ok(state.monitors.iter().take(size).cloned().collect())
    }

    async fn create_monitor(&self, document: &MonitorDocument) -> Result<String, BackendError> {
        self.record(Operation::Create(document.name.clone()))?;
        let rejected = self
            .fail_create
            .lock()
            .map_err(|_| poisoned())?
            .contains(&document.name);
        if rejected {
            return Err(BackendError::Status {
                status: 400,
                body: format!("monitor '{}' rejected", document.name),
            });
        }

        let mut state = self.state.lock().map_err(|_| poisoned())?;
        state.next_id += 1;
        let id = format!("mon-{}", state.next_id);
        state
            .monitors
            .push(ExistingMonitor::new(id.clone(), document.name.clone()));
        state.created.push(document.clone());
        Ok(id)
    }

    async fn delete_monitor(&self, id: &str) -> Result<(), BackendError> {
        self.record(Operation::Delete(id.to_string()))?;
        let rejected = self.fail_delete.lock().map_err(|_| poisoned())?.contains(id);
        if rejected {
            return Err(BackendError::Status {
                status: 500,
                body: format!("could not delete {id}"),
            });
        }

        let mut state = self.state.lock().map_err(|_| poisoned())?;
        let before = state.monitors.len();
        state.monitors.retain(|m| m.id != id);
        if state.monitors.len() == before {
            return Err(BackendError::Status {
                status: 404,
                body: format!("monitor {id} not found"),
            });
        }
        state.deleted.push(id.to_string());
        Ok(())
    }

    async fn info(&self) -> Result<ClusterInfo, BackendError> {
        self.record(Operation::Info)?;
        Ok(ClusterInfo {
            cluster_name: "in-memory".to_string(),
            version: "2.x".to_string(),
        })
    }
}
