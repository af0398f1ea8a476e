use crate::application::services::remote_state::RemoteStateReader;
use crate::domain::ports::backend::BackendGateway;
use crate::presentation::cli::formatters::monitor_fmt::format_monitor_table;
use crate::presentation::cli::formatters::status_fmt::print_section_header;

/// Prints the monitors currently stored in the backend.
///
/// # Errors
///
/// Returns an error if the listing fails or JSON serialization fails.
pub async fn run_list(
    backend: &dyn BackendGateway,
    search_size: usize,
    json: bool,
) -> anyhow::Result<()> {
    let monitors = RemoteStateReader::new(backend, search_size)
        .try_list_existing()
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&monitors)?);
    } else {
        print_section_header(&format!("📋 Monitors in cluster ({})", monitors.len()));
        println!("{}", format_monitor_table(&monitors));
    }
    Ok(())
}
