use std::fmt::Write;

use colored::Colorize;

use super::status_fmt::sanitize_terminal;
use crate::domain::entities::existing_monitor::ExistingMonitor;
use crate::domain::entities::monitor_spec::DesiredSet;

/// Renders the parsed desired set, one block per monitor, followed by any
/// rejected entries.
#[must_use]
pub fn format_desired_set(set: &DesiredSet) -> String {
    let mut out = String::new();
    for m in &set.monitors {
        let _ = writeln!(out, "- Name: {}", m.name.bold());
        let _ = writeln!(out, "  Index: {}", m.index);
        let _ = writeln!(out, "  Keyword: {}", m.keyword);
        let _ = writeln!(out, "  Time Window: {}", m.time_window);
        let _ = writeln!(out, "  Notification Channel: {}", m.channel_name);
        out.push('\n');
    }
    for r in &set.rejected {
        let _ = writeln!(
            out,
            "{} {} — {}",
            "rejected".red().bold(),
            r.name.bold(),
            r.reason.dimmed()
        );
    }
    out
}

/// Aligned `ID  NAME` table of monitors present in the backend.
#[must_use]
pub fn format_monitor_table(monitors: &[ExistingMonitor]) -> String {
    let id_width = monitors
        .iter()
        .map(|m| m.id.chars().count())
        .max()
        .unwrap_or(0)
        .max("ID".len());

    let header = format!("{:<id_width$}  {}", "ID", "NAME");
    let separator = "─".repeat(header.chars().count().max(id_width + 6));

    let mut rows = vec![header, separator];
    for m in monitors {
        let name = sanitize_terminal(m.display_name());
        let row = format!("{:<id_width$}  {name}", sanitize_terminal(&m.id));
        if m.name.is_none() {
            rows.push(row.dimmed().to_string());
        } else {
            rows.push(row);
        }
    }
    rows.join("\n")
}
