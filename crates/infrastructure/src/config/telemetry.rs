//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryAppConfig {
    /// Log level filter (e.g. "info", "weatherlog=debug,tower_http=info");
    /// `RUST_LOG` takes precedence when set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info,tower_http=info,sqlx=warn".to_string()
}

impl Default for TelemetryAppConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
        }
    }
}
