//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod maps_adapter;
mod weather_adapter;
mod youtube_adapter;

pub use maps_adapter::{DirectionsMode, GoogleMapsAdapter};
pub use weather_adapter::WeatherAdapter;
pub use youtube_adapter::YouTubeAdapter;
