// ABOUTME: Load command - import a dump file into the destination table
// ABOUTME: Reads dump-<destination table>.bin and streams it through binary COPY

use crate::commands::display_path;
use crate::config::Config;
use crate::migration::load_table;
use crate::postgres::open_target;
use anyhow::{Context, Result};

/// Load `dump-<destination table>.bin` into the configured destination table
///
/// # Returns
///
/// Number of rows loaded.
pub async fn load(config: &Config) -> Result<u64> {
    config.destination.validate("destination")?;

    let (client, table) = open_target(&config.destination)
        .await
        .context("Failed to open destination database")?;

    let path = config.dump_path(&table.to_string());
    let rows = load_table(&client, &table, &path).await?;

    tracing::info!("✓ Data loaded from {}", display_path(&path).display());
    Ok(rows)
}
