use std::collections::HashSet;

use serde::Serialize;

use crate::domain::entities::existing_monitor::ExistingMonitor;
use crate::domain::entities::monitor_spec::MonitorSpec;
use crate::domain::value_objects::name_index::NameIndex;

/// An orphaned monitor scheduled for deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedDeletion {
    pub id: String,
    pub name: Option<String>,
}

impl PlannedDeletion {
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// Name-based diff between the desired and the observed monitor sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncPlan {
    /// Desired monitors with no remote counterpart.
    pub to_create: Vec<MonitorSpec>,
    /// Remote monitors with no desired counterpart.
    pub to_delete: Vec<PlannedDeletion>,
    /// Names present on both sides. Left untouched even if definitions differ.
    pub unchanged: Vec<String>,
    /// Remote monitors kept only because their desired entry was rejected.
    pub reserved: Vec<String>,
}

impl SyncPlan {
    /// Computes the diff. Both sides collapse duplicate names with
    /// last-write-wins before comparing.
    #[must_use]
    pub fn compute(
        desired: &[MonitorSpec],
        existing: &[ExistingMonitor],
        reserved_names: &[String],
    ) -> Self {
        let existing_by_name: NameIndex<Option<String>, String> = existing
            .iter()
            .map(|m| (m.name.clone(), m.id.clone()))
            .collect();
        let desired_by_name: NameIndex<String, &MonitorSpec> = desired
            .iter()
            .map(|spec| (spec.name.clone(), spec))
            .collect();
        let reserved: HashSet<&str> = reserved_names.iter().map(String::as_str).collect();

        let mut plan = Self::default();

        for (name, spec) in desired_by_name.iter() {
            if existing_by_name.contains_key(&Some(name.clone())) {
                plan.unchanged.push(name.clone());
            } else {
                plan.to_create.push((*spec).clone());
            }
        }

        for (name, id) in existing_by_name.iter() {
            match name {
                Some(n) if desired_by_name.contains_key(n) => {}
                Some(n) if reserved.contains(n.as_str()) => plan.reserved.push(n.clone()),
                _ => plan.to_delete.push(PlannedDeletion {
                    id: id.clone(),
                    name: name.clone(),
                }),
            }
        }

        plan
    }

    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.to_create.is_empty() && self.to_delete.is_empty()
    }
}
