//! Latitude/longitude pair

use std::{fmt, ops::RangeInclusive};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

const LATITUDE: RangeInclusive<f64> = -90.0..=90.0;
const LONGITUDE: RangeInclusive<f64> = -180.0..=180.0;

/// Coordinates of a looked-up city, serialized as `{lat, lon}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    #[serde(rename = "lat")]
    latitude: f64,
    #[serde(rename = "lon")]
    longitude: f64,
}

impl GeoLocation {
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` when either axis is out of
    /// range or not a number.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if LATITUDE.contains(&latitude) && LONGITUDE.contains(&longitude) {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(DomainError::InvalidCoordinates {
                latitude,
                longitude,
            })
        }
    }

    /// Trusted coordinates, e.g. rows already validated on insert
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// `lat,lon` with no space, as used in map query strings
impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_city_coordinates() {
        let paris = GeoLocation::new(48.8566, 2.3522).unwrap();
        assert!((paris.latitude() - 48.8566).abs() < f64::EPSILON);
        assert!((paris.longitude() - 2.3522).abs() < f64::EPSILON);
    }

    #[test]
    fn poles_and_antimeridian_are_inclusive() {
        for (lat, lon) in [(90.0, 180.0), (-90.0, -180.0), (0.0, 0.0)] {
            assert!(GeoLocation::new(lat, lon).is_ok(), "{lat},{lon}");
        }
    }

    #[test]
    fn rejects_out_of_range_and_nan() {
        for (lat, lon) in [(91.0, 0.0), (-91.0, 0.0), (0.0, 181.0), (0.0, -181.0), (f64::NAN, 0.0)] {
            assert!(
                matches!(
                    GeoLocation::new(lat, lon),
                    Err(DomainError::InvalidCoordinates { .. })
                ),
                "{lat},{lon}"
            );
        }
    }

    #[test]
    fn displays_as_query_pair() {
        let london = GeoLocation::new(51.5, -0.12).unwrap();
        assert_eq!(london.to_string(), "51.5,-0.12");
    }

    #[test]
    fn serializes_with_short_keys() {
        let london = GeoLocation::new(51.5, -0.12).unwrap();
        let json = serde_json::to_value(london).unwrap();
        assert_eq!(json, serde_json::json!({"lat": 51.5, "lon": -0.12}));
    }
}
