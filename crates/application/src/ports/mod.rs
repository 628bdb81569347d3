//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod database_health_port;
mod map_link_port;
mod video_search_port;
mod weather_port;
mod weather_record_store;

#[cfg(test)]
pub use database_health_port::MockDatabaseHealthPort;
pub use database_health_port::{DatabaseHealth, DatabaseHealthPort};
pub use map_link_port::MapLinkPort;
#[cfg(test)]
pub use map_link_port::MockMapLinkPort;
#[cfg(test)]
pub use video_search_port::MockVideoSearchPort;
pub use video_search_port::VideoSearchPort;
#[cfg(test)]
pub use weather_port::MockWeatherPort;
pub use weather_port::WeatherPort;
#[cfg(test)]
pub use weather_record_store::MockWeatherRecordStore;
pub use weather_record_store::{
    RecordFilter, RecordQuery, SortField, SortOrder, WeatherRecordStore,
};
