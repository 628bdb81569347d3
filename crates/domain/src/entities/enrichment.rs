//! Supplementary data attached to a weather record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// A related video found for a location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoLink {
    pub title: String,
    pub video_id: String,
    pub thumbnail: String,
    pub channel_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub description: String,
    pub url: String,
}

/// Generated map URLs for a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLinks {
    pub coordinates: GeoLocation,
    pub location_name: String,
    pub embed_url: String,
    pub google_maps_url: String,
    pub search_url: String,
    /// Only available with an API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_map_url: Option<String>,
    /// Only available with an API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_view_url: Option<String>,
}

/// Optional enrichments stored with a record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalData {
    #[serde(default)]
    pub videos: Vec<VideoLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps: Option<MapLinks>,
}

impl AdditionalData {
    /// True when neither videos nor maps are attached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty() && self.maps.is_none()
    }
}
