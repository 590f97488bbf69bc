mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use animatch_core::{load_config, validate_config, Config};

/// Anime catalog reconciliation and library verification toolkit.
#[derive(Parser, Debug)]
#[command(name = "animatch", version, about)]
struct Cli {
    /// Config file (also settable via ANIMATCH_CONFIG).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify the catalog against the search-result snapshot
    Verify,
    /// Export a download task list for verified entries
    ExportTasks,
    /// Repair folder mappings against a live listing of one remote
    Reconcile {
        /// Remote id from the config
        #[arg(long)]
        remote: String,
    },
    /// Adopt mappings onto another remote after a transfer
    Adopt {
        /// Target remote id from the config
        #[arg(long)]
        remote: String,
        /// Output mapping file (default: mapping file suffixed with the
        /// remote id)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Enumerate episode files for every mapping on a remote
    ScanEpisodes {
        /// Remote id from the config
        #[arg(long)]
        remote: String,
    },
    /// Submit a task list to the download backend
    Download {
        /// Task list file (default: the configured task file)
        #[arg(long)]
        tasks: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Verify => commands::verify(&config),
        Commands::ExportTasks => commands::export_tasks(&config),
        Commands::Reconcile { remote } => commands::reconcile(&config, &remote).await,
        Commands::Adopt { remote, output } => commands::adopt(&config, &remote, output).await,
        Commands::ScanEpisodes { remote } => commands::scan_episodes(&config, &remote).await,
        Commands::Download { tasks } => commands::download(&config, tasks).await,
    }
}

/// Resolve and validate the configuration.
///
/// An explicitly named config file (flag or env var) must exist; the
/// implicit default `config.toml` may be absent, in which case built-in
/// defaults apply.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let explicit = cli
        .config
        .clone()
        .or_else(|| std::env::var("ANIMATCH_CONFIG").ok().map(PathBuf::from));

    let config = match explicit {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => {
            let default_path = PathBuf::from("config.toml");
            if default_path.exists() {
                info!("Loading configuration from {:?}", default_path);
                load_config(&default_path)
                    .with_context(|| format!("Failed to load config from {:?}", default_path))?
            } else {
                info!("No config file, using defaults");
                Config::default()
            }
        }
    };

    validate_config(&config).context("Configuration validation failed")?;
    Ok(config)
}
