use clap::Parser;
use tracing_subscriber::EnvFilter;

use monsync::application::config::AppConfig;
use monsync::infrastructure::config_source::create_config_source;
use monsync::infrastructure::opensearch::OpenSearchGateway;
use monsync::presentation::cli::app::{Cli, Commands};
use monsync::presentation::cli::commands::list::run_list;
use monsync::presentation::cli::commands::sync::{run_sync, SyncOptions};
use monsync::presentation::cli::commands::validate::run_validate;

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Flags given on the command line win over every other layer.
fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(ref host) = cli.host {
        config.backend.host.clone_from(host);
    }
    if let Some(port) = cli.port {
        config.backend.port = port;
    }
    if let Some(ref user) = cli.user {
        config.backend.username.clone_from(user);
    }
    if let Some(ref password) = cli.password {
        config.backend.password.clone_from(password);
    }
    if let Some(ref path) = cli.monitors_file {
        config.source.path.clone_from(path);
        config.source.url = None;
    }
    if let Some(ref url) = cli.monitors_url {
        config.source.url = Some(url.clone());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    // defaults < TOML < environment < CLI
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok())?;
    apply_cli_overrides(&mut config, &cli);
    tracing::debug!(?config, "Effective configuration");

    // Manual DI — main.rs is the only place that knows concrete types
    let source = create_config_source(&config.source)?;

    match cli.command {
        Some(Commands::Validate { json }) => {
            run_validate(&*source, json).await?;
        }
        Some(Commands::List { json }) => {
            let backend = OpenSearchGateway::new(&config.backend)?;
            run_list(&backend, config.backend.search_size, json).await?;
        }
        Some(Commands::Sync {
            dry_run,
            strict,
            json,
        }) => {
            let backend = OpenSearchGateway::new(&config.backend)?;
            let options = SyncOptions {
                dry_run,
                strict,
                json,
                search_size: config.backend.search_size,
            };
            run_sync(&*source, &backend, options).await?;
        }
        None => {
            let backend = OpenSearchGateway::new(&config.backend)?;
            let options = SyncOptions {
                dry_run: false,
                strict: false,
                json: false,
                search_size: config.backend.search_size,
            };
            run_sync(&*source, &backend, options).await?;
        }
    }

    Ok(())
}
