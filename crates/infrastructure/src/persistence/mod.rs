//! Persistence module
//!
//! SQLite storage for weather records via a shared sqlx pool.

pub mod async_connection;
pub mod database_health;
pub mod error;
pub mod weather_record_store;

pub use async_connection::{AsyncDatabase, AsyncDatabaseConfig, AsyncDatabaseError};
pub use database_health::SqliteDatabaseHealth;
pub use weather_record_store::SqliteWeatherRecordStore;
