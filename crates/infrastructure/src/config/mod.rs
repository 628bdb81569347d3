//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `database`: SQLite database settings
//! - `integrations`: OpenWeatherMap, YouTube and Google Maps
//! - `records`: record caching window and pagination limits
//! - `telemetry`: log filter
//!
//! Values are layered: built-in defaults, then an optional `config.toml`
//! in the working directory, then `WEATHERLOG__*` environment variables
//! (`WEATHERLOG__SERVER__PORT=8080`, `WEATHERLOG__WEATHER__API_KEY=...`).

mod database;
mod integrations;
mod records;
mod server;
mod telemetry;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use database::DatabaseConfig;
pub use integrations::{MapsAppConfig, WeatherAppConfig, YouTubeAppConfig};
pub use records::RecordsConfig;
pub use server::ServerConfig;
pub use telemetry::TelemetryAppConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "WEATHERLOG";

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - internal error details exposed
    #[default]
    Development,
    /// Production environment - internal error details hidden
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    /// OpenWeatherMap settings
    #[serde(default)]
    pub weather: WeatherAppConfig,

    /// YouTube Data API settings
    #[serde(default)]
    pub youtube: YouTubeAppConfig,

    /// Google Maps settings
    #[serde(default)]
    pub maps: MapsAppConfig,

    #[serde(default)]
    pub telemetry: TelemetryAppConfig,

    /// Record service tuning
    #[serde(default)]
    pub records: RecordsConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (optional) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(Self::environment_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from an explicit TOML file path
    pub fn load_from(path: &str) -> Result<Self, config::ConfigError> {
        Self::builder()
            .add_source(config::File::with_name(path).required(true))
            .add_source(Self::environment_source())
            .build()?
            .try_deserialize()
    }

    /// Parse configuration from a TOML string (no environment overrides)
    pub fn from_toml(toml: &str) -> Result<Self, config::ConfigError> {
        Self::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn builder() -> config::ConfigBuilder<config::builder::DefaultState> {
        config::Config::builder()
    }

    fn environment_source() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("server.allowed_origins")
    }

    /// Whether internal error details may reach HTTP clients
    #[must_use]
    pub fn expose_internal_errors(&self) -> bool {
        self.server
            .expose_internal_errors
            .unwrap_or(self.environment == Environment::Development)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn environment_default_is_development() {
        assert_eq!(Environment::default(), Environment::Development);
    }

    #[test]
    fn environment_display() {
        assert_eq!(format!("{}", Environment::Development), "development");
        assert_eq!(format!("{}", Environment::Production), "production");
    }

    #[test]
    fn environment_from_str() {
        assert_eq!(
            "prod".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!(
            "DEVELOPMENT".parse::<Environment>().unwrap(),
            Environment::Development
        );
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.path, "weatherlog.db");
        assert_eq!(
            config.weather.base_url,
            "https://api.openweathermap.org/data/2.5"
        );
        assert!(config.weather.api_key.is_none());
        assert_eq!(config.youtube.max_results, 5);
        assert!(config.maps.api_key.is_none());
        assert_eq!(config.records.recent_window_secs, 3600);
        assert_eq!(config.records.default_page_size, 10);
        assert_eq!(config.records.max_page_size, 100);
    }

    #[test]
    fn toml_sections_override_defaults() {
        let config = AppConfig::from_toml(
            r#"
            environment = "production"

            [server]
            port = 8080
            allowed_origins = ["https://weather.example.com"]

            [database]
            path = "/var/lib/weatherlog/data.db"
            max_connections = 8

            [weather]
            api_key = "owm-secret"
            timeout_secs = 5

            [youtube]
            api_key = "yt-secret"
            max_results = 3

            [records]
            recent_window_secs = 600
            "#,
        )
        .unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.allowed_origins.len(), 1);
        assert_eq!(config.database.max_connections, 8);
        assert_eq!(
            config.weather.api_key.as_ref().map(ExposeSecret::expose_secret),
            Some("owm-secret")
        );
        assert_eq!(config.weather.timeout_secs, 5);
        assert_eq!(config.youtube.api_key_str(), Some("yt-secret"));
        assert_eq!(config.youtube.max_results, 3);
        assert_eq!(config.records.recent_window_secs, 600);
    }

    #[test]
    fn expose_internal_errors_follows_environment() {
        let mut config = AppConfig::default();
        assert!(config.expose_internal_errors());

        config.environment = Environment::Production;
        assert!(!config.expose_internal_errors());

        config.server.expose_internal_errors = Some(true);
        assert!(config.expose_internal_errors());
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = AppConfig::from_toml(
            r#"
            [weather]
            api_key = "owm-secret"
            [maps]
            api_key = "maps-secret"
            "#,
        )
        .unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("owm-secret"));
        assert!(!debug.contains("maps-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
