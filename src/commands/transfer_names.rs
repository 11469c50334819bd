// ABOUTME: Transfer-names command - reconcile address name rows by address hash
// ABOUTME: Streams source rows and inserts those missing from the destination

use crate::config::Config;
use crate::migration::{reconcile, stream_names, PgNameStore, ReconcileSummary, RowOutcome};
use crate::postgres::open_target;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Insert every source name row whose address hash the destination lacks
///
/// Safe to re-run: rows already present are skipped. A row that fails to
/// insert is logged and counted; the command still succeeds.
///
/// # Errors
///
/// Returns an error if either endpoint cannot be opened, the source cannot be
/// read, or an existence check fails.
pub async fn transfer_names(config: &Config) -> Result<ReconcileSummary> {
    config.source.validate("source")?;
    config.destination.validate("destination")?;

    let (source_client, source_table) = open_target(&config.source)
        .await
        .context("Failed to open source database")?;
    let (dest_client, dest_table) = open_target(&config.destination)
        .await
        .context("Failed to open destination database")?;
    tracing::info!("✓ Database connection is working");

    tracing::info!(
        "Reconciling names from '{}' into '{}'...",
        source_table,
        dest_table
    );
    let rows = stream_names(&source_client, &source_table).await?;
    let store = PgNameStore::new(&dest_client, &dest_table);

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} [{elapsed_precise}] {msg}")
            .context("Invalid progress template")?,
    );
    progress.enable_steady_tick(Duration::from_millis(120));

    // Log lines go through suspend so they are not drawn over by the spinner
    let result = reconcile(rows, &store, |outcome, s| {
        match outcome {
            RowOutcome::Inserted { address_hash } => progress.suspend(|| {
                tracing::info!("Inserted row with address_hash: {}", hex::encode(address_hash))
            }),
            RowOutcome::Failed {
                address_hash,
                error,
            } => progress.suspend(|| {
                tracing::error!(
                    "Error writing address_hash {} to target table: {:#}",
                    hex::encode(address_hash),
                    error
                )
            }),
            RowOutcome::Skipped { .. } => {}
        }
        progress.set_message(format!(
            "{} scanned, {} inserted, {} skipped, {} failed",
            s.scanned, s.inserted, s.skipped, s.failed
        ))
    })
    .await;
    progress.finish_and_clear();
    let summary = result?;

    if summary.failed > 0 {
        tracing::warn!(
            "⚠ {} rows could not be inserted; see errors above",
            summary.failed
        );
    }
    tracing::info!(
        "✅ Data transferred successfully: {} scanned, {} inserted, {} already present",
        summary.scanned,
        summary.inserted,
        summary.skipped
    );
    Ok(summary)
}
