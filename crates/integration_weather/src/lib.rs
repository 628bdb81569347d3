//! OpenWeatherMap integration
//!
//! Client for the OpenWeatherMap 2.5 API (<https://openweathermap.org/api>).
//! Fetches current conditions and the 5-day / 3-hour forecast for a city
//! name, a zip code or a coordinate pair.

pub mod client;
mod location;
mod models;

pub use client::{OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError};
pub use location::LocationQuery;
pub use models::{
    CityResponse, Clouds, Coord, CurrentWeatherResponse, ForecastItem, ForecastResponse,
    MainReadings, Sys, WeatherDescription, WeatherReport, Wind,
};
