//! Wotgraph CLI — inspect, replay and check web of trust snapshots.
//!
//! Subcommands: init, dump, replay, distance, sentries, paths, centrality,
//! import-legacy.

mod commands;
mod config;
mod logging;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use config::WotgraphConfig;

/// Wotgraph — certification graph engine of a web of trust.
#[derive(Parser, Debug)]
#[command(name = "wotgraph", version, about, long_about = None)]
struct Cli {
    /// Path to the config file.
    #[arg(short, long, global = true, default_value = "wotgraph.toml")]
    config: PathBuf,

    /// Override the snapshot path.
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default config and an empty snapshot.
    Init(commands::init::InitArgs),
    /// Print the canonical text dump of the snapshot.
    Dump(commands::dump::DumpArgs),
    /// Apply blocks of events from a JSON file to the snapshot.
    Replay(commands::replay::ReplayArgs),
    /// Evaluate the distance rule for a member, or for every member.
    Distance(commands::distance::DistanceArgs),
    /// List sentries (or non-sentries).
    Sentries(commands::sentries::SentriesArgs),
    /// List certification chains between two members.
    Paths(commands::paths::PathsArgs),
    /// Compute centrality measures of every node.
    Centrality(commands::centrality::CentralityArgs),
    /// Convert a legacy binary file into a snapshot.
    ImportLegacy(commands::import_legacy::ImportLegacyArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = WotgraphConfig::load(&cli.config)?;
    if let Some(ref path) = cli.snapshot {
        config.storage.snapshot_path = path.clone();
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    logging::init(&config.logging);
    tracing::debug!(
        config = %cli.config.display(),
        snapshot = %config.storage.snapshot_path.display(),
        "configuration loaded"
    );

    match &cli.command {
        Commands::Init(args) => commands::init::run(args, &cli.config, &config),
        Commands::Dump(args) => commands::dump::run(args, &config),
        Commands::Replay(args) => commands::replay::run(args, &config),
        Commands::Distance(args) => commands::distance::run(args, &config),
        Commands::Sentries(args) => commands::sentries::run(args, &config),
        Commands::Paths(args) => commands::paths::run(args, &config),
        Commands::Centrality(args) => commands::centrality::run(args, &config),
        Commands::ImportLegacy(args) => commands::import_legacy::run(args, &config),
    }
}
