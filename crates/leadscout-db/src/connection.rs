//! Database connection management.
//!
//! Provides pool construction for the `SQLite` lead store.

use crate::error::{DatabaseError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;

/// Open (and create if missing) the `SQLite` database at `path` and
/// return a connection pool.
///
/// # Errors
/// Returns `DatabaseError::Open` if the path is invalid or the pool
/// cannot be initialized.
pub async fn connect(path: impl AsRef<Path>) -> Result<Pool<Sqlite>> {
    let path_str = path
        .as_ref()
        .to_str()
        .ok_or_else(|| DatabaseError::Open("invalid database path: not valid UTF-8".to_string()))?;

    let connect_options = SqliteConnectOptions::from_str(path_str)
        .map_err(|e| DatabaseError::Open(format!("invalid connection string: {e}")))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await
        .map_err(|e| DatabaseError::Open(format!("failed to initialize pool: {e}")))?;

    tracing::info!("Database pool created at {}", path_str);

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_connect_creates_file() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("leads.db");

        let pool = connect(&path).await.expect("create pool");
        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .expect("query works");

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_connect_invalid_path() {
        let result = connect("/nonexistent-root-dir/never/leads.db").await;
        assert!(result.is_err());
    }
}
