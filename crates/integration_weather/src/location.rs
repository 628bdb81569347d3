//! Location query classification
//!
//! OpenWeatherMap accepts three kinds of location: `lat`/`lon` pairs,
//! `zip` codes and free-text city names (`q`).

use std::fmt;

/// How a free-text location is sent to the weather API
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// `lat,lon` pair
    Coordinates { latitude: f64, longitude: f64 },
    /// `ddddd`, `ddddd-dddd` or `ddddd,cc`
    Zip(String),
    /// Anything else
    City(String),
}

impl LocationQuery {
    /// Classify a location string
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let location = location.trim();

        if let Some((latitude, longitude)) = parse_coordinates(location) {
            return Self::Coordinates {
                latitude,
                longitude,
            };
        }

        if is_zip_code(location) {
            return Self::Zip(location.to_string());
        }

        Self::City(location.to_string())
    }

    /// Query parameters identifying this location
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Coordinates {
                latitude,
                longitude,
            } => vec![("lat", latitude.to_string()), ("lon", longitude.to_string())],
            Self::Zip(zip) => vec![("zip", zip.clone())],
            Self::City(name) => vec![("q", name.clone())],
        }
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coordinates {
                latitude,
                longitude,
            } => write!(f, "{latitude},{longitude}"),
            Self::Zip(value) | Self::City(value) => f.write_str(value),
        }
    }
}

fn parse_coordinates(location: &str) -> Option<(f64, f64)> {
    let mut parts = location.split(',');
    let latitude = parts.next()?.trim().parse::<f64>().ok()?;
    let longitude = parts.next()?.trim().parse::<f64>().ok()?;
    if !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }
    Some((latitude, longitude))
}

fn all_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_zip_code(location: &str) -> bool {
    if all_digits(location, 5) {
        return true;
    }
    if let Some((head, tail)) = location.split_once('-') {
        return all_digits(head, 5) && all_digits(tail, 4);
    }
    if let Some((head, country)) = location.split_once(',') {
        return all_digits(head, 5)
            && country.len() == 2
            && country.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_are_detected() {
        assert_eq!(
            LocationQuery::parse("51.5085,-0.1257"),
            LocationQuery::Coordinates {
                latitude: 51.5085,
                longitude: -0.1257
            }
        );
        assert_eq!(
            LocationQuery::parse(" 40.7 , -74.0 "),
            LocationQuery::Coordinates {
                latitude: 40.7,
                longitude: -74.0
            }
        );
    }

    #[test]
    fn zip_codes_are_detected() {
        assert_eq!(
            LocationQuery::parse("10001"),
            LocationQuery::Zip("10001".to_string())
        );
        assert_eq!(
            LocationQuery::parse("10001-1234"),
            LocationQuery::Zip("10001-1234".to_string())
        );
        assert_eq!(
            LocationQuery::parse("10115,de"),
            LocationQuery::Zip("10115,de".to_string())
        );
    }

    #[test]
    fn everything_else_is_a_city() {
        assert_eq!(
            LocationQuery::parse("London, GB"),
            LocationQuery::City("London, GB".to_string())
        );
        assert_eq!(
            LocationQuery::parse("1234"),
            LocationQuery::City("1234".to_string())
        );
        assert_eq!(
            LocationQuery::parse("10001,usa"),
            LocationQuery::City("10001,usa".to_string())
        );
    }

    #[test]
    fn query_pairs_per_kind() {
        assert_eq!(
            LocationQuery::parse("1.5,2.5").query_pairs(),
            vec![("lat", "1.5".to_string()), ("lon", "2.5".to_string())]
        );
        assert_eq!(
            LocationQuery::parse("10001").query_pairs(),
            vec![("zip", "10001".to_string())]
        );
        assert_eq!(
            LocationQuery::parse("New York").query_pairs(),
            vec![("q", "New York".to_string())]
        );
    }

    #[test]
    fn display_round_trips_the_input() {
        assert_eq!(LocationQuery::parse("Paris").to_string(), "Paris");
        assert_eq!(LocationQuery::parse("1.5,2.5").to_string(), "1.5,2.5");
    }
}
