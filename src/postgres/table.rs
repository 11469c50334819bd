// ABOUTME: Table references and catalog existence checks
// ABOUTME: Parses optionally schema-qualified names and renders them as quoted SQL

use crate::utils::{quote_identifier, sanitize_identifier};
use anyhow::{bail, Context, Result};
use std::fmt;
use tokio_postgres::Client;

/// A table name as configured, optionally qualified with a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub schema: Option<String>,
    pub name: String,
}

impl TableRef {
    /// Parse `table` or `schema.table`
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            bail!("Table name cannot be empty");
        }

        match raw.split_once('.') {
            Some((schema, name)) => {
                if schema.is_empty() || name.is_empty() || name.contains('.') {
                    bail!(
                        "Invalid table name '{}'. Expected 'table' or 'schema.table'",
                        sanitize_identifier(raw)
                    );
                }
                Ok(Self {
                    schema: Some(schema.to_string()),
                    name: name.to_string(),
                })
            }
            None => Ok(Self {
                schema: None,
                name: raw.to_string(),
            }),
        }
    }

    /// Quoted form for splicing into generated SQL
    pub fn to_sql(&self) -> String {
        match &self.schema {
            Some(schema) => format!(
                "{}.{}",
                quote_identifier(schema),
                quote_identifier(&self.name)
            ),
            None => quote_identifier(&self.name),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(
                f,
                "{}.{}",
                sanitize_identifier(schema),
                sanitize_identifier(&self.name)
            ),
            None => write!(f, "{}", sanitize_identifier(&self.name)),
        }
    }
}

/// Check whether a table exists in the connected database
///
/// An unqualified name matches a table of that name in any schema.
pub async fn table_exists(client: &Client, table: &TableRef) -> Result<bool> {
    let row = match &table.schema {
        Some(schema) => {
            client
                .query_one(
                    "SELECT EXISTS (
                        SELECT FROM information_schema.tables
                        WHERE table_schema = $1 AND table_name = $2
                     )",
                    &[schema, &table.name],
                )
                .await
        }
        None => {
            client
                .query_one(
                    "SELECT EXISTS (
                        SELECT FROM information_schema.tables
                        WHERE table_name = $1
                     )",
                    &[&table.name],
                )
                .await
        }
    }
    .with_context(|| format!("Failed to check whether table '{}' exists", table))?;

    Ok(row.get(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unqualified() {
        let table = TableRef::parse("address_names").unwrap();
        assert_eq!(table.schema, None);
        assert_eq!(table.name, "address_names");
        assert_eq!(table.to_sql(), "\"address_names\"");
        assert_eq!(table.to_string(), "address_names");
    }

    #[test]
    fn test_parse_qualified() {
        let table = TableRef::parse(" public.address_names ").unwrap();
        assert_eq!(table.schema.as_deref(), Some("public"));
        assert_eq!(table.name, "address_names");
        assert_eq!(table.to_sql(), "\"public\".\"address_names\"");
        assert_eq!(table.to_string(), "public.address_names");
    }

    #[test]
    fn test_parse_rejects_malformed_names() {
        assert!(TableRef::parse("").is_err());
        assert!(TableRef::parse("   ").is_err());
        assert!(TableRef::parse(".names").is_err());
        assert!(TableRef::parse("public.").is_err());
        assert!(TableRef::parse("a.b.c").is_err());
    }

    #[test]
    fn test_to_sql_escapes_quotes() {
        let table = TableRef::parse("we\"ird").unwrap();
        assert_eq!(table.to_sql(), "\"we\"\"ird\"");
    }

    #[tokio::test]
    #[ignore]
    async fn test_table_exists_against_live_database() {
        let url = std::env::var("TEST_SOURCE_URL").unwrap();
        let client = crate::postgres::connect(&url).await.unwrap();

        let catalog = TableRef::parse("information_schema.tables").unwrap();
        assert!(table_exists(&client, &catalog).await.unwrap());

        let missing = TableRef::parse("definitely_not_a_table_4f1c").unwrap();
        assert!(!table_exists(&client, &missing).await.unwrap());
    }
}
