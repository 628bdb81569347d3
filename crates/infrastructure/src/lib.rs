//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: SQLite persistence,
//! OpenWeatherMap, YouTube and Google Maps adapters, configuration loading
//! and logging setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, DatabaseConfig, Environment, MapsAppConfig, RecordsConfig, ServerConfig,
    TelemetryAppConfig, WeatherAppConfig, YouTubeAppConfig,
};
pub use persistence::{
    AsyncDatabase, AsyncDatabaseConfig, AsyncDatabaseError, SqliteDatabaseHealth,
    SqliteWeatherRecordStore,
};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
