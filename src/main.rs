use anyhow::Result;
use clap::{Parser, Subcommand};

use trailkeeper::cli::{handle_list, handle_show, handle_stats, ListArgs};
use trailkeeper::config::{paths::TrailPaths, settings::Settings};
use trailkeeper::storage::AuditStore;

#[derive(Parser)]
#[command(
    name = "trailkeeper",
    version,
    about = "Append-only audit trail for entity mutations",
    long_about = "trailkeeper records an immutable audit trail of insert, update \
                  and delete operations on business entities, capturing who \
                  performed each action and what changed. This binary exposes \
                  the read side of the log."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List audit records, newest first
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one record in full, including its payload
    Show {
        /// Record id
        id: u64,
    },

    /// Grouped record counts by operation, username and target
    Stats,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse();

    let paths = TrailPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let store = AuditStore::open(paths.audit_log())?;

    let output = match cli.command {
        Commands::List(args) => handle_list(&args, &store, &settings)?,
        Commands::Show { id } => handle_show(id, &store)?,
        Commands::Stats => handle_stats(&store)?,
        Commands::Config => format_config(&paths, &settings),
    };
    print!("{}", output);

    Ok(())
}

fn format_config(paths: &TrailPaths, settings: &Settings) -> String {
    format!(
        "Base directory: {}\nSettings file:  {}\nAudit log:      {}\nList limit:     {}\n",
        paths.base_dir().display(),
        paths.settings_file().display(),
        paths.audit_log().display(),
        settings.list_limit
    )
}

fn init_tracing() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("TRAILKEEPER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
