//! SQLite pool shared by the record store and the health probe
//!
//! The schema lives in the workspace `migrations/` directory and is embedded
//! at compile time.

use std::{path::Path, str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
};
use tracing::{debug, info, instrument};

use crate::config::DatabaseConfig;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const MEMORY_URL: &str = "sqlite::memory:";

#[derive(Debug, thiserror::Error)]
pub enum AsyncDatabaseError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Pool settings derived from [`DatabaseConfig`]
#[derive(Debug, Clone)]
pub struct AsyncDatabaseConfig {
    /// sqlx connection URL, `sqlite:<path>` or `sqlite::memory:`
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Write-ahead logging; ignored for in-memory databases
    pub wal_mode: bool,
}

impl Default for AsyncDatabaseConfig {
    fn default() -> Self {
        Self::file("weatherlog.db")
    }
}

impl AsyncDatabaseConfig {
    /// Single-connection in-memory database
    ///
    /// Every pooled connection to `:memory:` opens its own empty database, so
    /// the pool is pinned to one connection.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: MEMORY_URL.to_string(),
            max_connections: 1,
            min_connections: 1,
            wal_mode: false,
        }
    }

    #[must_use]
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            url: format!("sqlite:{}", path.as_ref().display()),
            max_connections: 5,
            min_connections: 1,
            wal_mode: true,
        }
    }

    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }

    fn connect_options(&self) -> Result<SqliteConnectOptions, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&self.url)?
            .create_if_missing(true)
            .busy_timeout(BUSY_TIMEOUT);

        if self.wal_mode && !self.is_in_memory() {
            Ok(options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal))
        } else {
            Ok(options)
        }
    }
}

impl From<&DatabaseConfig> for AsyncDatabaseConfig {
    fn from(config: &DatabaseConfig) -> Self {
        if config.is_in_memory() {
            Self::in_memory()
        } else {
            Self {
                max_connections: config.max_connections.max(1),
                ..Self::file(&config.path)
            }
        }
    }
}

/// Handle to the shared pool
#[derive(Debug, Clone)]
pub struct AsyncDatabase {
    pool: SqlitePool,
}

impl AsyncDatabase {
    /// Open the pool, creating the database file if needed
    #[instrument(skip_all, fields(url = %config.url))]
    pub async fn new(config: &AsyncDatabaseConfig) -> Result<Self, AsyncDatabaseError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_with(config.connect_options()?)
            .await?;

        info!(
            max_connections = config.max_connections,
            wal = config.wal_mode && !config.is_in_memory(),
            "Database pool ready"
        );

        Ok(Self { pool })
    }

    pub async fn in_memory() -> Result<Self, AsyncDatabaseError> {
        Self::new(&AsyncDatabaseConfig::in_memory()).await
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Apply pending migrations; already-applied ones are skipped
    #[instrument(skip(self))]
    pub async fn migrate(&self) -> Result<(), AsyncDatabaseError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        debug!("Database pool closed");
    }
}
