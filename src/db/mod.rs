//! Database connection and repositories
//!
//! [`Database::connect`] is the one-time initialization step: it opens the
//! SQLite pool and syncs entity schemas. Callers run it before touching any
//! repository and [`Database::close`] when they are done.

pub mod cars;
pub mod schema_sync;

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{info, warn};

pub use cars::{CarRecord, CarRepository, CreateCar};
pub use schema_sync::{SchemaSyncResult, sync_entity};

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Pool size from `DATABASE_MAX_CONNECTIONS`, default 1 for a serial run
    fn get_max_connections() -> u32 {
        std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1)
    }

    /// Open the pool and bring the schema up to date
    pub async fn connect(url: &str, create_if_missing: bool) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid database URL: {}", url))?
            .create_if_missing(create_if_missing);

        let pool = SqlitePoolOptions::new()
            .max_connections(Self::get_max_connections())
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database {}", url))?;

        let db = Self { pool };
        db.sync_schema().await?;
        info!(url = %url, "Database connected");
        Ok(db)
    }

    /// Private in-memory database, kept on a single long-lived connection
    pub async fn connect_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let db = Self { pool };
        db.sync_schema().await?;
        Ok(db)
    }

    async fn sync_schema(&self) -> Result<()> {
        let result = sync_entity::<CarRecord>(&self.pool)
            .await
            .context("Schema sync failed")?;

        if !result.tables_created.is_empty() {
            info!(tables = ?result.tables_created, "Created tables");
        }
        if !result.columns_added.is_empty() {
            info!(columns = ?result.columns_added, "Added columns");
        }
        for err in &result.errors {
            warn!(error = %err, "Schema sync error");
        }
        Ok(())
    }

    /// Get a car repository
    pub fn cars(&self) -> CarRepository {
        CarRepository::new(self.pool.clone())
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
