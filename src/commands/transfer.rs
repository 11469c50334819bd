// ABOUTME: Transfer command - dump the source table and load it into the destination
// ABOUTME: Both steps share one dump file within a single invocation

use crate::commands::display_path;
use crate::config::Config;
use crate::migration::{dump_table, load_table};
use crate::postgres::open_target;
use anyhow::{Context, Result};

/// Copy all matching source rows into the destination table
///
/// Both endpoints are opened before anything is written. The dump file is
/// named after the source table and left on disk afterwards. Rows that
/// collide with existing destination keys make the load fail; nothing is
/// reconciled here (see `transfer-names` for that).
///
/// # Returns
///
/// Number of rows loaded into the destination.
pub async fn transfer(config: &Config) -> Result<u64> {
    config.source.validate("source")?;
    config.destination.validate("destination")?;

    let (source_client, source_table) = open_target(&config.source)
        .await
        .context("Failed to open source database")?;
    let (dest_client, dest_table) = open_target(&config.destination)
        .await
        .context("Failed to open destination database")?;
    tracing::info!("✓ Database connection is working");

    let path = config.dump_path(&source_table.to_string());
    dump_table(&source_client, &source_table, &path, config.condition()).await?;
    tracing::info!("✓ Data dumped to {}", display_path(&path).display());

    let rows = load_table(&dest_client, &dest_table, &path).await?;

    tracing::info!(
        "✅ Data transferred successfully: {} rows from '{}' to '{}'",
        rows,
        source_table,
        dest_table
    );
    Ok(rows)
}
