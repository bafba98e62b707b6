//! Database pool configuration and migrations

use anyhow::Result;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Create the SQLite connection pool
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    SqlitePoolOptions::new()
        // SQLite is single-writer, but can have multiple readers
        .max_connections(max_connections.max(1))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .connect(database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))
}

/// Applies any pending migrations from the specified directory.
/// Uses SQLite's `_sqlx_migrations` table to track applied migrations.
pub async fn run_migrations(pool: &SqlitePool, migrations_path: &Path) -> Result<()> {
    if !migrations_path.exists() {
        warn!("Migrations directory not found: {}", migrations_path.display());
        return Ok(());
    }

    let migrator = Migrator::new(migrations_path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load migrations: {}", e))?;

    migrator
        .run(pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    info!("Migrations complete");
    Ok(())
}

/// Get current schema version (number of applied migrations)
pub async fn get_schema_version(pool: &SqlitePool) -> Result<i64> {
    let result: Option<(i64,)> =
        sqlx::query_as("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_optional(pool)
            .await?;

    Ok(result.map(|(c,)| c).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrations_apply_to_memory_db() {
        let pool = create_pool("sqlite::memory:", 1).await.unwrap();
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");

        run_migrations(&pool, &dir).await.unwrap();
        assert_eq!(get_schema_version(&pool).await.unwrap(), 1);

        // Idempotent
        run_migrations(&pool, &dir).await.unwrap();
        assert_eq!(get_schema_version(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_directory_is_not_an_error() {
        let pool = create_pool("sqlite::memory:", 1).await.unwrap();
        let tmp = tempfile::tempdir().unwrap();
        run_migrations(&pool, &tmp.path().join("nope")).await.unwrap();
    }
}
