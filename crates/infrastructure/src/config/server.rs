//! `[server]` section

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// HTTP listener and request handling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    pub cors_enabled: bool,
    /// Empty allows any origin
    pub allowed_origins: Vec<String>,

    /// Grace period for in-flight requests on shutdown
    pub shutdown_timeout_secs: u64,

    /// Per-dependency probe timeout for `/ready`
    pub readiness_timeout_secs: u64,

    /// `text` or `json`
    pub log_format: String,

    /// Request body cap in bytes
    pub max_body_size_json_bytes: usize,

    /// Unset follows the environment
    pub expose_internal_errors: Option<bool>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_enabled: true,
            allowed_origins: Vec::new(),
            shutdown_timeout_secs: 30,
            readiness_timeout_secs: 5,
            log_format: "text".to_string(),
            max_body_size_json_bytes: 1024 * 1024,
            expose_internal_errors: None,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    #[must_use]
    pub const fn readiness_timeout(&self) -> Duration {
        Duration::from_secs(self.readiness_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert!(config.cors_enabled);
        assert_eq!(config.max_body_size_json_bytes, 1_048_576);
        assert_eq!(config.readiness_timeout(), Duration::from_secs(5));
        assert!(!config.json_logs());
    }

    #[test]
    fn json_log_format_is_case_insensitive() {
        let config = ServerConfig {
            log_format: "JSON".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.json_logs());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: ServerConfig =
            serde_json::from_value(serde_json::json!({"port": 8080, "log_format": "json"}))
                .unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert!(config.json_logs());
        assert_eq!(config.shutdown_timeout_secs, 30);
    }
}
