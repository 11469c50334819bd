// ABOUTME: Existence-check-then-insert reconciliation of name rows
// ABOUTME: Copies source rows whose address hash is missing from the destination

use crate::migration::names::NameRow;
use anyhow::{Context, Result};
use futures::{pin_mut, Stream, StreamExt};

/// Destination side of the reconciler
///
/// Implemented by [`PgNameStore`](crate::migration::names::PgNameStore) for a
/// live database; tests use an in-memory store.
#[allow(async_fn_in_trait)]
pub trait NameStore {
    /// Whether a row with this address hash is already present
    async fn contains(&self, address_hash: &[u8]) -> Result<bool>;

    /// Insert the row verbatim, including its id
    async fn insert(&self, row: &NameRow) -> Result<()>;
}

/// Counts reported at the end of a reconciliation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub scanned: u64,
    pub inserted: u64,
    pub skipped: u64,
    pub failed: u64,
}

/// What happened to a single source row
#[derive(Debug)]
pub enum RowOutcome<'a> {
    Skipped { address_hash: &'a [u8] },
    Inserted { address_hash: &'a [u8] },
    Failed {
        address_hash: &'a [u8],
        error: &'a anyhow::Error,
    },
}

/// Insert every source row whose address hash the destination lacks
///
/// Rows are processed one at a time in source order. Rows already present are
/// skipped without comparison, so running this twice inserts nothing the
/// second time, and an interrupted run can simply be repeated.
///
/// `on_row` is called after each row with its outcome and the running totals.
/// Reporting inserts and failures to the operator is left to the caller, so
/// it can route them around any progress display.
///
/// # Errors
///
/// A failure to read a source row or to check existence aborts the run. A
/// failed insert is passed to `on_row` as [`RowOutcome::Failed`], counted in
/// [`ReconcileSummary::failed`], and the next row is attempted.
pub async fn reconcile<S, D, F>(
    source: S,
    destination: &D,
    mut on_row: F,
) -> Result<ReconcileSummary>
where
    S: Stream<Item = Result<NameRow>>,
    D: NameStore,
    F: FnMut(RowOutcome<'_>, &ReconcileSummary),
{
    let mut summary = ReconcileSummary::default();
    pin_mut!(source);

    while let Some(row) = source.next().await {
        let row = row.context("Error reading from source table")?;
        summary.scanned += 1;

        let exists = destination
            .contains(&row.address_hash)
            .await
            .with_context(|| {
                format!(
                    "Failed to check address_hash {} in destination",
                    hex::encode(&row.address_hash)
                )
            })?;

        if exists {
            tracing::debug!(
                "Skipping existing address_hash: {}",
                hex::encode(&row.address_hash)
            );
            summary.skipped += 1;
            on_row(
                RowOutcome::Skipped {
                    address_hash: &row.address_hash,
                },
                &summary,
            );
            continue;
        }

        match destination.insert(&row).await {
            Ok(()) => {
                summary.inserted += 1;
                on_row(
                    RowOutcome::Inserted {
                        address_hash: &row.address_hash,
                    },
                    &summary,
                );
            }
            Err(e) => {
                tracing::debug!(
                    "Insert of address_hash {} failed: {:#}",
                    hex::encode(&row.address_hash),
                    e
                );
                summary.failed += 1;
                on_row(
                    RowOutcome::Failed {
                        address_hash: &row.address_hash,
                        error: &e,
                    },
                    &summary,
                );
            }
        }
    }

    Ok(summary)
}
