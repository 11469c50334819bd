// ABOUTME: Dump command - export the source table to its dump file
// ABOUTME: Opens the source, applies the configured condition, writes binary COPY data

use crate::commands::display_path;
use crate::config::Config;
use crate::migration::dump_table;
use crate::postgres::open_target;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Dump the configured source table to `dump-<source table>.bin`
///
/// # Returns
///
/// Absolute path of the written dump file.
pub async fn dump(config: &Config) -> Result<PathBuf> {
    config.source.validate("source")?;

    let (client, table) = open_target(&config.source)
        .await
        .context("Failed to open source database")?;

    let path = config.dump_path(&table.to_string());
    dump_table(&client, &table, &path, config.condition()).await?;

    let path = display_path(&path);
    tracing::info!("✓ Data dumped to {}", path.display());
    Ok(path)
}
