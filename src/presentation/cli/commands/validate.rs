use crate::domain::ports::config_source::ConfigSource;
use crate::presentation::cli::formatters::monitor_fmt::format_desired_set;
use crate::presentation::cli::formatters::status_fmt::{
    fail_marker, ok_marker, print_section_header,
};

/// Loads the desired monitors and reports what would be synced, without
/// touching the backend.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, if any entry is
/// rejected, or if JSON serialization fails.
pub async fn run_validate(source: &dyn ConfigSource, json: bool) -> anyhow::Result<()> {
    let desired = source.load_desired_monitors().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&desired)?);
    } else {
        print_section_header(&format!("📄 Desired monitors ({})", source.describe()));
        print!("{}", format_desired_set(&desired));
        let marker = if desired.rejected.is_empty() {
            ok_marker()
        } else {
            fail_marker()
        };
        println!(
            "{marker} {} valid, {} rejected",
            desired.monitors.len(),
            desired.rejected.len()
        );
    }

    if !desired.rejected.is_empty() {
        anyhow::bail!(
            "{} monitor definition(s) rejected in {}",
            desired.rejected.len(),
            source.describe()
        );
    }
    Ok(())
}
