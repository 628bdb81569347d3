//! Weather observations and forecasts as stored on a record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// A weather condition tag (e.g. "Clouds" / "broken clouds")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherCondition {
    /// Provider condition code
    pub id: u32,
    /// Condition group
    pub main: String,
    /// Human-readable description
    pub description: String,
    /// Provider icon code
    pub icon: String,
}

/// Current conditions at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    /// Observation time
    pub observed_at: DateTime<Utc>,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Feels-like temperature in Celsius
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Pressure in hPa
    pub pressure: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_direction: Option<f64>,
    /// Visibility in metres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
    /// Cloud cover in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloudiness: Option<f64>,
    #[serde(default)]
    pub conditions: Vec<WeatherCondition>,
}

impl CurrentConditions {
    /// Description of the primary condition, empty if none was reported
    #[must_use]
    pub fn description(&self) -> &str {
        self.conditions
            .first()
            .map_or("", |c| c.description.as_str())
    }
}

/// One 3-hourly forecast slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastEntry {
    /// Start of the forecast slot
    pub forecast_at: DateTime<Utc>,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    /// Probability of precipitation (0.0 - 1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_probability: Option<f64>,
    #[serde(default)]
    pub conditions: Vec<WeatherCondition>,
}

impl ForecastEntry {
    /// Description of the primary condition, empty if none was reported
    #[must_use]
    pub fn description(&self) -> &str {
        self.conditions
            .first()
            .map_or("", |c| c.description.as_str())
    }
}

/// City metadata reported by the weather provider
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityInfo {
    pub name: String,
    pub country: String,
    /// Shift from UTC in seconds
    pub timezone_offset: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunrise: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunset: Option<DateTime<Utc>>,
}

/// Everything a single weather lookup returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub coordinates: GeoLocation,
    pub city: CityInfo,
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastEntry>,
}


#[cfg(test)]
mod tests {
    use super::fixtures;

    #[test]
    fn description_uses_first_condition() {
        let current = fixtures::current();
        assert_eq!(current.description(), "broken clouds");
    }

    #[test]
    fn description_empty_without_conditions() {
        let mut entry = fixtures::forecast(9);
        entry.conditions.clear();
        assert_eq!(entry.description(), "");
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let json = serde_json::to_value(fixtures::snapshot()).unwrap();
        assert!(json["current"].get("feelsLike").is_some());
        assert!(json["city"].get("timezoneOffset").is_some());
        assert_eq!(json["coordinates"]["lat"], 51.5085);
    }
}
