// ABOUTME: Fixed-schema address name rows and their PostgreSQL access
// ABOUTME: Streams rows from the source and looks up or inserts them by address hash

use crate::migration::reconcile::NameStore;
use crate::postgres::TableRef;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use futures::{Stream, StreamExt};
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, Row};

/// Columns of the name table, in the order they are selected and inserted
pub const NAME_COLUMNS: &str =
    "address_hash, name, \"primary\", inserted_at, updated_at, metadata, id";

/// One row of the address name table
#[derive(Debug, Clone, PartialEq)]
pub struct NameRow {
    /// Natural key used for reconciliation
    pub address_hash: Vec<u8>,
    pub name: String,
    pub primary: bool,
    pub inserted_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub metadata: Option<serde_json::Value>,
    pub id: i32,
}

impl NameRow {
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            address_hash: row.try_get("address_hash").context("Invalid address_hash")?,
            name: row.try_get("name").context("Invalid name")?,
            primary: row.try_get("primary").context("Invalid primary flag")?,
            inserted_at: row.try_get("inserted_at").context("Invalid inserted_at")?,
            updated_at: row.try_get("updated_at").context("Invalid updated_at")?,
            metadata: row.try_get("metadata").context("Invalid metadata")?,
            id: row.try_get("id").context("Invalid id")?,
        })
    }
}

pub fn select_names_query(table: &TableRef) -> String {
    format!("SELECT {} FROM {}", NAME_COLUMNS, table.to_sql())
}

pub fn exists_query(table: &TableRef) -> String {
    format!(
        "SELECT EXISTS (SELECT 1 FROM {} WHERE address_hash = $1)",
        table.to_sql()
    )
}

pub fn insert_query(table: &TableRef) -> String {
    format!(
        "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        table.to_sql(),
        NAME_COLUMNS
    )
}

/// Stream every row of the source name table
///
/// Rows are decoded as they arrive; the result set is never held in memory
/// as a whole. The stream is forward-only and can be consumed once.
pub async fn stream_names(
    client: &Client,
    table: &TableRef,
) -> Result<impl Stream<Item = Result<NameRow>>> {
    let rows = client
        .query_raw(
            select_names_query(table).as_str(),
            std::iter::empty::<&(dyn ToSql + Sync)>(),
        )
        .await
        .with_context(|| format!("Failed to query name rows from '{}'", table))?;

    Ok(rows.map(|row| {
        let row = row.context("Failed to read name row from source")?;
        NameRow::from_row(&row)
    }))
}

/// Destination name table backed by a live connection
pub struct PgNameStore<'a> {
    client: &'a Client,
    exists_sql: String,
    insert_sql: String,
}

impl<'a> PgNameStore<'a> {
    pub fn new(client: &'a Client, table: &TableRef) -> Self {
        Self {
            client,
            exists_sql: exists_query(table),
            insert_sql: insert_query(table),
        }
    }
}

impl NameStore for PgNameStore<'_> {
    async fn contains(&self, address_hash: &[u8]) -> Result<bool> {
        let row = self
            .client
            .query_one(self.exists_sql.as_str(), &[&address_hash])
            .await
            .context("Existence check failed")?;
        Ok(row.get(0))
    }

    async fn insert(&self, row: &NameRow) -> Result<()> {
        self.client
            .execute(
                self.insert_sql.as_str(),
                &[
                    &row.address_hash,
                    &row.name,
                    &row.primary,
                    &row.inserted_at,
                    &row.updated_at,
                    &row.metadata,
                    &row.id,
                ],
            )
            .await
            .context("Insert failed")?;
        Ok(())
    }
}
