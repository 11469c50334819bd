// ABOUTME: Connectivity test command
// ABOUTME: Opens both endpoints, verifies their tables exist, then closes them

use crate::config::Config;
use crate::postgres::open_target;
use anyhow::{Context, Result};

/// Check that source and destination are reachable and their tables exist
///
/// Both connections are dropped before returning.
///
/// # Errors
///
/// Returns an error if either endpoint is not configured, cannot be
/// reached, or lacks its table.
pub async fn test_connection(config: &Config) -> Result<()> {
    config.source.validate("source")?;
    config.destination.validate("destination")?;

    tracing::info!("Connecting to source database...");
    let (source_client, source_table) = open_target(&config.source)
        .await
        .context("Failed to open source database")?;
    tracing::info!("✓ Connected to source, table '{}' exists", source_table);

    tracing::info!("Connecting to destination database...");
    let (dest_client, dest_table) = open_target(&config.destination)
        .await
        .context("Failed to open destination database")?;
    tracing::info!("✓ Connected to destination, table '{}' exists", dest_table);

    drop(source_client);
    drop(dest_client);

    tracing::info!("✅ Database connection is working");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DbTarget;

    #[tokio::test]
    async fn test_connection_requires_configured_endpoints() {
        let config = Config {
            source: DbTarget::new("postgresql://user@localhost/db", "names"),
            ..Config::default()
        };
        let err = test_connection(&config).await.unwrap_err();
        assert!(err.to_string().contains("destination"));
    }

    #[tokio::test]
    async fn test_connection_with_invalid_source_fails() {
        let config = Config {
            source: DbTarget::new("invalid-url", "names"),
            destination: DbTarget::new("postgresql://user@localhost/db", "names"),
            ..Config::default()
        };
        assert!(test_connection(&config).await.is_err());
    }
}
