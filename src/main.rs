// ABOUTME: CLI entry point for postgres-table-transfer
// ABOUTME: Loads configuration and routes subcommands to their handlers

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use postgres_table_transfer::commands;
use postgres_table_transfer::config::{Config, DEFAULT_CONFIG_PATH};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "postgres-table-transfer")]
#[command(
    about = "Transfer rows of one table between two PostgreSQL databases",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Path to the YAML config file with source/destination settings
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that both databases are reachable and their tables exist
    Test,
    /// Dump the source table (optionally filtered) to a binary file
    Dump,
    /// Load the destination table's dump file into the destination table
    Load,
    /// Dump the source table and load it into the destination table
    Transfer,
    /// Insert source name rows whose address hash is missing from the destination
    TransferNames,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging - default to INFO level if RUST_LOG not set
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = Config::load(&cli.config)?;

    match command {
        Commands::Test => commands::test_connection(&config).await,
        Commands::Dump => commands::dump(&config).await.map(|_| ()),
        Commands::Load => commands::load(&config).await.map(|_| ()),
        Commands::Transfer => commands::transfer(&config).await.map(|_| ()),
        Commands::TransferNames => commands::transfer_names(&config).await.map(|_| ()),
    }
}
