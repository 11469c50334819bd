// ABOUTME: Binary COPY import of a dump file into a table
// ABOUTME: Streams the file into the server in fixed-size chunks

use crate::postgres::TableRef;
use anyhow::{Context, Result};
use bytes::Bytes;
use futures::{pin_mut, SinkExt};
use std::path::Path;
use tokio::io::AsyncReadExt;
use tokio_postgres::Client;

const CHUNK_SIZE: usize = 64 * 1024;

/// Build the COPY statement that imports into `table`
pub fn build_load_query(table: &TableRef) -> String {
    format!("COPY {} FROM STDIN (FORMAT binary)", table.to_sql())
}

/// Load a binary COPY dump file into `table`
///
/// The file must have been produced by a binary COPY of a table with the same
/// column order and types; no schema validation is done here. Rows that
/// collide with existing keys make the whole COPY fail.
///
/// # Returns
///
/// Number of rows the server reports as loaded.
pub async fn load_table(client: &Client, table: &TableRef, input_path: &Path) -> Result<u64> {
    tracing::info!("Loading {} into table '{}'", input_path.display(), table);

    let mut file = tokio::fs::File::open(input_path)
        .await
        .with_context(|| format!("Failed to open dump file {}", input_path.display()))?;

    let sink = client
        .copy_in::<_, Bytes>(build_load_query(table).as_str())
        .await
        .with_context(|| format!("Failed to start COPY import into table '{}'", table))?;
    pin_mut!(sink);

    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = file
            .read(&mut buf)
            .await
            .with_context(|| format!("Failed to read dump file {}", input_path.display()))?;
        if n == 0 {
            break;
        }
        sink.send(Bytes::copy_from_slice(&buf[..n]))
            .await
            .with_context(|| format!("COPY import into table '{}' failed", table))?;
    }

    let rows = sink
        .finish()
        .await
        .with_context(|| format!("COPY import into table '{}' failed", table))?;

    tracing::info!("✓ Loaded {} rows into '{}'", rows, table);
    Ok(rows)
}
