//! `[database]` section

use serde::{Deserialize, Serialize};

const MEMORY_PATH: &str = ":memory:";

/// Where weather records are stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file, or `:memory:`
    pub path: String,
    pub max_connections: u32,
    /// Apply embedded migrations at startup
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "weatherlog.db".to_string(),
            max_connections: 5,
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == MEMORY_PATH
    }
}
