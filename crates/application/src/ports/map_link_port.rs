//! Map link port

use domain::{GeoLocation, MapLinks};
#[cfg(test)]
use mockall::automock;

/// Port for building map URLs for a location
///
/// Implementations only generate URLs and perform no I/O.
#[cfg_attr(test, automock)]
pub trait MapLinkPort: Send + Sync {
    /// Build the map links for `coordinates`, labelled with `location_name`
    fn map_links(&self, coordinates: &GeoLocation, location_name: &str) -> MapLinks;
}
