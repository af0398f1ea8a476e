use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// monsync — keeps `OpenSearch` alerting monitors in line with a JSON file
///
/// Reads the desired monitors, compares them by name with the monitors
/// present in the cluster, creates the missing ones and deletes the orphans.
#[derive(Parser, Debug)]
#[command(name = "monsync")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute (defaults to `sync`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// `OpenSearch` host
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// `OpenSearch` port
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// `OpenSearch` username
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// `OpenSearch` password
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Fetch the desired monitors from this URL instead of a local file
    #[arg(long, global = true)]
    pub monitors_url: Option<String>,

    /// Local JSON file holding the desired monitors
    #[arg(long, global = true)]
    pub monitors_file: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile the cluster with the desired monitors
    #[command(alias = "s")]
    Sync {
        /// Show what would change without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Abort instead of continuing when existing monitors cannot be read
        #[arg(long)]
        strict: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List monitors currently present in the cluster
    #[command(alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse the desired monitors without contacting the cluster
    #[command(alias = "v")]
    Validate {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
