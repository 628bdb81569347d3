//! Google Maps link adapter - Implements MapLinkPort
//!
//! Pure URL generation; no requests are made. Without an API key only the
//! keyless links (basic embed, maps and search URLs) are produced.

use application::ports::MapLinkPort;
use domain::{GeoLocation, MapLinks};
use secrecy::{ExposeSecret, SecretString};

const EMBED_ZOOM: u8 = 12;
const STATIC_MAP_SIZE: &str = "600x400";
const STREET_VIEW_SIZE: &str = "600x400";

/// Travel mode for directions links
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DirectionsMode {
    #[default]
    Driving,
    Bicycling,
    Walking,
    Transit,
}

impl DirectionsMode {
    /// Parse a mode name, falling back to driving
    #[must_use]
    pub fn parse_lenient(mode: &str) -> Self {
        match mode.trim().to_lowercase().as_str() {
            "bicycling" => Self::Bicycling,
            "walking" => Self::Walking,
            "transit" => Self::Transit,
            _ => Self::Driving,
        }
    }

    /// Google Maps data code for the mode
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Driving => 0,
            Self::Bicycling => 1,
            Self::Walking => 2,
            Self::Transit => 3,
        }
    }
}

/// Google Maps URL builder
#[derive(Clone, Default)]
pub struct GoogleMapsAdapter {
    api_key: Option<SecretString>,
}

impl std::fmt::Debug for GoogleMapsAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleMapsAdapter")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl GoogleMapsAdapter {
    #[must_use]
    pub fn new(api_key: Option<&str>) -> Self {
        Self {
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(|k| SecretString::from(k.to_string())),
        }
    }

    fn key(&self) -> Option<&str> {
        self.api_key.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Embed URL: the Embed API with a key, a basic keyless embed otherwise
    #[must_use]
    pub fn embed_url(&self, coordinates: &GeoLocation, location_name: &str) -> String {
        let (lat, lon) = (coordinates.latitude(), coordinates.longitude());
        match self.key() {
            Some(key) => format!(
                "https://www.google.com/maps/embed/v1/place?key={key}&q={}&center={lat},{lon}&zoom={EMBED_ZOOM}",
                urlencoding::encode(&query_name(coordinates, location_name))
            ),
            None => format!(
                "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d3000!2d{lon}!3d{lat}\
                 !2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x0%3A0x0!2zM!5e0\
                 !3m2!1sen!2sus!4v1234567890123!5m2!1sen!2sus"
            ),
        }
    }

    /// Static map image URL with a red marker labelled by the name's initial
    #[must_use]
    pub fn static_map_url(&self, coordinates: &GeoLocation, location_name: &str) -> Option<String> {
        let key = self.key()?;
        let (lat, lon) = (coordinates.latitude(), coordinates.longitude());
        let label = location_name
            .trim()
            .chars()
            .next()
            .map_or_else(|| "A".to_string(), |c| c.to_uppercase().collect());

        Some(format!(
            "https://maps.googleapis.com/maps/api/staticmap?center={lat},{lon}&zoom={EMBED_ZOOM}\
             &size={STATIC_MAP_SIZE}&maptype=roadmap&format=png&key={key}\
             &markers=color:red%7Clabel:{}%7C{lat},{lon}",
            urlencoding::encode(&label)
        ))
    }

    /// Street View image URL
    #[must_use]
    pub fn street_view_url(&self, coordinates: &GeoLocation) -> Option<String> {
        let key = self.key()?;
        Some(format!(
            "https://maps.googleapis.com/maps/api/streetview?size={STREET_VIEW_SIZE}\
             &location={},{}&heading=0&pitch=0&fov=90&key={key}",
            coordinates.latitude(),
            coordinates.longitude()
        ))
    }

    /// Directions link between two points
    #[must_use]
    pub fn directions_url(from: &GeoLocation, to: &GeoLocation, mode: DirectionsMode) -> String {
        let (to_lat, to_lon) = (to.latitude(), to.longitude());
        format!(
            "https://www.google.com/maps/dir/{},{}/{to_lat},{to_lon}/@{to_lat},{to_lon},12z/data=!3m1!4b1!4m2!4m1!3e{}",
            from.latitude(),
            from.longitude(),
            mode.code()
        )
    }
}

/// Name used in queries, falling back to "lat,lon"
fn query_name(coordinates: &GeoLocation, location_name: &str) -> String {
    let name = location_name.trim();
    if name.is_empty() {
        format!("{},{}", coordinates.latitude(), coordinates.longitude())
    } else {
        name.to_string()
    }
}

impl MapLinkPort for GoogleMapsAdapter {
    fn map_links(&self, coordinates: &GeoLocation, location_name: &str) -> MapLinks {
        let (lat, lon) = (coordinates.latitude(), coordinates.longitude());
        let display_name = if location_name.trim().is_empty() {
            format!("{lat}, {lon}")
        } else {
            location_name.trim().to_string()
        };

        MapLinks {
            coordinates: *coordinates,
            location_name: display_name,
            embed_url: self.embed_url(coordinates, location_name),
            google_maps_url: format!("https://www.google.com/maps?q={lat},{lon}"),
            search_url: format!(
                "https://www.google.com/maps/search/{}",
                urlencoding::encode(&query_name(coordinates, location_name))
            ),
            static_map_url: self.static_map_url(coordinates, location_name),
            street_view_url: self.street_view_url(coordinates),
        }
    }
}
