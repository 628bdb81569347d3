//! Database health port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of a successful database probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseHealth {
    /// Engine name and version, e.g. `SQLite 3.45.0`
    pub engine_version: String,
    /// Round-trip time of the probe query
    pub query_time_ms: u64,
}

impl DatabaseHealth {
    #[must_use]
    pub fn new(engine_version: impl Into<String>, query_time_ms: u64) -> Self {
        Self {
            engine_version: engine_version.into(),
            query_time_ms,
        }
    }
}

/// Probe for the record database
///
/// An unreachable database is reported as an error from `check_health`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatabaseHealthPort: Send + Sync {
    /// Run a probe query and report the engine version
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError>;

    /// Whether a probe currently succeeds
    async fn is_available(&self) -> bool {
        self.check_health().await.is_ok()
    }
}
