//! Weather record entity - A persisted, enriched weather lookup

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{AdditionalData, CityInfo, CurrentConditions, ForecastEntry, WeatherSnapshot};
use crate::value_objects::{DateRange, GeoLocation, RecordId};

/// A stored weather lookup for a location and date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    pub id: RecordId,
    /// Location as entered by the user, trimmed
    pub location: String,
    pub coordinates: GeoLocation,
    pub city: CityInfo,
    pub date_range: DateRange,
    pub current_weather: CurrentConditions,
    pub forecast: Vec<ForecastEntry>,
    #[serde(default)]
    pub additional_data: AdditionalData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WeatherRecord {
    /// Default freshness window for cached lookups
    pub const DEFAULT_RECENT_WINDOW_SECS: i64 = 60 * 60;

    /// Build a new record from a lookup result
    #[must_use]
    pub fn new(
        location: impl Into<String>,
        date_range: DateRange,
        snapshot: WeatherSnapshot,
        additional_data: AdditionalData,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RecordId::generate_at(now),
            location: location.into(),
            coordinates: snapshot.coordinates,
            city: snapshot.city,
            date_range,
            current_weather: snapshot.current,
            forecast: snapshot.forecast,
            additional_data,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the weather payload and enrichments, bumping `updated_at`
    pub fn refresh(
        &mut self,
        location: impl Into<String>,
        date_range: DateRange,
        snapshot: WeatherSnapshot,
        additional_data: AdditionalData,
        now: DateTime<Utc>,
    ) {
        self.location = location.into();
        self.date_range = date_range;
        self.coordinates = snapshot.coordinates;
        self.city = snapshot.city;
        self.current_weather = snapshot.current;
        self.forecast = snapshot.forecast;
        self.additional_data = additional_data;
        self.updated_at = now;
    }

    /// Whether the record was refreshed within `window` of `now`
    #[must_use]
    pub fn is_data_recent(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.updated_at > now - window
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::entities::weather_data::fixtures;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 10, 12, 0, 0).unwrap()
    }

    fn record() -> WeatherRecord {
        let range = DateRange::new(now() - Duration::days(2), now()).unwrap();
        WeatherRecord::new(
            "London",
            range,
            fixtures::snapshot(),
            AdditionalData::default(),
            now(),
        )
    }

    #[test]
    fn new_copies_snapshot() {
        let record = record();
        assert_eq!(record.city.name, "London");
        assert_eq!(record.forecast.len(), 2);
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn recent_within_window() {
        let record = record();
        let window = Duration::seconds(WeatherRecord::DEFAULT_RECENT_WINDOW_SECS);
        assert!(record.is_data_recent(now() + Duration::minutes(59), window));
        assert!(!record.is_data_recent(now() + Duration::hours(1), window));
    }

    #[test]
    fn refresh_bumps_updated_at() {
        let mut record = record();
        let later = now() + Duration::hours(3);
        let range = DateRange::new(later - Duration::days(1), later).unwrap();
        record.refresh("Paris", range, fixtures::snapshot(), AdditionalData::default(), later);
        assert_eq!(record.location, "Paris");
        assert_eq!(record.updated_at, later);
        assert_eq!(record.created_at, now());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(record()).unwrap();
        assert!(json.get("dateRange").is_some());
        assert!(json.get("currentWeather").is_some());
        assert!(json["additionalData"]["videos"].is_array());
    }
}
