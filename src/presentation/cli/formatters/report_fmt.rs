use std::fmt::Write;

use colored::Colorize;

use super::status_fmt::{fail_marker, ok_marker, sanitize_terminal};
use crate::application::services::reconciler::SyncReport;
use crate::domain::plan::SyncPlan;

/// Per-monitor outcome lines followed by a one-line summary.
#[must_use]
pub fn format_report(report: &SyncReport) -> String {
    let mut out = String::new();

    for created in &report.created {
        let _ = writeln!(
            out,
            "{} Created monitor: {} ({})",
            ok_marker(),
            sanitize_terminal(&created.name).bold(),
            created.id.dimmed()
        );
    }
    for deleted in &report.deleted {
        let name = deleted.name.as_deref().unwrap_or("<unnamed>");
        let _ = writeln!(
            out,
            "{} Deleted monitor: {} ({})",
            ok_marker(),
            sanitize_terminal(name).bold(),
            deleted.id.dimmed()
        );
    }
    for name in &report.reserved {
        let _ = writeln!(
            out,
            "{} Kept monitor with invalid definition: {}",
            "!".yellow().bold(),
            sanitize_terminal(name)
        );
    }
    for failure in &report.failures {
        let _ = writeln!(out, "{} {}", fail_marker(), sanitize_terminal(&failure.to_string()));
    }

    let elapsed = report.finished_at - report.started_at;
    let summary = format!(
        "{} created, {} deleted, {} unchanged, {} failed in {} ms",
        report.created.len(),
        report.deleted.len(),
        report.unchanged.len(),
        report.failures.len(),
        elapsed.num_milliseconds()
    );
    if report.is_converged() {
        let _ = write!(out, "{}", summary.green());
    } else {
        let _ = write!(out, "{}", summary.yellow());
    }
    out
}

/// What a sync pass would do, without doing it.
#[must_use]
pub fn format_plan(plan: &SyncPlan) -> String {
    let mut out = String::new();
    for spec in &plan.to_create {
        let _ = writeln!(
            out,
            "{} {} (index {}, every {}, channel {})",
            "+ create".green(),
            spec.name.bold(),
            spec.index,
            spec.time_window,
            spec.channel_name
        );
    }
    for orphan in &plan.to_delete {
        let _ = writeln!(
            out,
            "{} {} ({})",
            "- delete".red(),
            sanitize_terminal(orphan.display_name()).bold(),
            orphan.id.dimmed()
        );
    }
    for name in &plan.reserved {
        let _ = writeln!(out, "{} {}", "! keep  ".yellow(), sanitize_terminal(name));
    }
    if plan.is_noop() {
        let _ = write!(out, "{}", "Nothing to do: backend matches the desired set".green());
    } else {
        let _ = write!(
            out,
            "{} to create, {} to delete, {} unchanged",
            plan.to_create.len(),
            plan.to_delete.len(),
            plan.unchanged.len()
        );
    }
    out
}
