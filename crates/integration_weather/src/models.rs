//! OpenWeatherMap response models
//!
//! Only the fields the service stores are modelled; the rest of the payload
//! is ignored during deserialization.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherDescription {
    pub id: u32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub deg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Clouds {
    #[serde(default)]
    pub all: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub sunrise: Option<i64>,
    #[serde(default)]
    pub sunset: Option<i64>,
}

/// `GET /weather` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherResponse {
    /// Missing coordinates make the payload unusable
    #[serde(default)]
    pub coord: Option<Coord>,
    #[serde(default)]
    pub weather: Vec<WeatherDescription>,
    pub main: MainReadings,
    #[serde(default)]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub clouds: Clouds,
    /// Observation time, Unix seconds
    pub dt: i64,
    #[serde(default)]
    pub sys: Sys,
    /// Shift from UTC in seconds
    #[serde(default)]
    pub timezone: i32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastItem {
    /// Forecast time, Unix seconds
    pub dt: i64,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<WeatherDescription>,
    #[serde(default)]
    pub wind: Wind,
    /// Probability of precipitation, 0.0 to 1.0
    #[serde(default)]
    pub pop: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CityResponse {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub timezone: i32,
}

/// `GET /forecast` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    /// Missing list makes the payload unusable
    #[serde(default)]
    pub list: Option<Vec<ForecastItem>>,
    #[serde(default)]
    pub city: CityResponse,
}

/// Validated pair of current conditions and forecast
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub coordinates: Coord,
    pub current: CurrentWeatherResponse,
    pub forecast: Vec<ForecastItem>,
    pub city: CityResponse,
}
