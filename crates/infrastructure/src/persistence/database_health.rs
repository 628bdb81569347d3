//! SQLite database health adapter
//!
//! Implements the `DatabaseHealthPort` on top of the shared sqlx pool.

use std::time::Instant;

use application::error::ApplicationError;
use application::ports::{DatabaseHealth, DatabaseHealthPort};
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, instrument, warn};

/// SQLite database health adapter
#[derive(Debug, Clone)]
pub struct SqliteDatabaseHealth {
    pool: SqlitePool,
}

impl SqliteDatabaseHealth {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseHealthPort for SqliteDatabaseHealth {
    #[instrument(skip(self))]
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError> {
        let start = Instant::now();

        let version: String = sqlx::query_scalar("SELECT sqlite_version()")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Database health check failed");
                ApplicationError::Internal(format!("Health check query failed: {e}"))
            })?;

        // Health checks complete in well under u64::MAX milliseconds
        #[allow(clippy::cast_possible_truncation)]
        let response_time_ms = start.elapsed().as_millis() as u64;

        debug!(
            version = %version,
            response_time_ms,
            "Database health check passed"
        );

        Ok(DatabaseHealth::new(
            format!("SQLite {version}"),
            response_time_ms,
        ))
    }
}
