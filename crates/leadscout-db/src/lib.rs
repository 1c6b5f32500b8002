//! LeadScout Database Layer
//!
//! Provides `SQLite` lead persistence using `SQLx` with embedded,
//! versioned migrations.
//!
//! # Architecture
//!
//! - **Migrations**: SQL migrations are embedded and versioned using `SQLx`
//! - **Connection Pooling**: Configurable connection pool (default: 5 connections)
//! - **Append-only leads**: no uniqueness key; every insert creates a new row
//!
//! # Example
//!
//! ```ignore
//! use leadscout_db::Database;
//!
//! let db = Database::new("leadscout.db").await?;
//! db.run_migrations().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod connection;
pub mod error;
#[allow(missing_docs)]
pub mod leads;
pub mod migrations;

// Re-export commonly used types
pub use error::{DatabaseError, Result};
pub use leads::{LeadStore, StoredLead};

use leadscout_core::EnrichedLead;
use std::path::Path;

/// High-level database interface with pooling and migrations.
#[derive(Debug)]
pub struct Database {
    pool: sqlx::Pool<sqlx::Sqlite>,
}

impl Database {
    /// Open (and create if missing) the database at the specified path.
    ///
    /// # Errors
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let pool = connection::connect(path).await?;
        Ok(Self { pool })
    }

    /// Run all pending database migrations.
    ///
    /// This should be called after creating a new database instance to
    /// ensure the schema is up to date.
    ///
    /// # Errors
    /// Returns `DatabaseError::Migration` if any migration fails.
    pub async fn run_migrations(&self) -> Result<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Get the current schema version.
    ///
    /// # Errors
    /// Returns `DatabaseError` if the version cannot be queried.
    pub async fn get_schema_version(&self) -> Result<i64> {
        migrations::get_schema_version(&self.pool).await
    }

    /// Get a reference to the underlying connection pool.
    ///
    /// This allows direct access to the `SQLx` pool for custom queries.
    #[must_use]
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Sqlite> {
        &self.pool
    }

    /// Close the database connection gracefully.
    pub async fn close(self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}

#[async_trait::async_trait]
impl LeadStore for Database {
    async fn insert(&self, lead: &EnrichedLead) -> Result<String> {
        leads::insert_lead(&self.pool, lead).await
    }
}
