//! Record service tuning.

use application::RecordServiceConfig;
use domain::WeatherRecord;
use serde::{Deserialize, Serialize};

/// Caching window and pagination limits for weather records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsConfig {
    /// A stored record younger than this is returned instead of refetching
    #[serde(default = "default_recent_window")]
    pub recent_window_secs: u64,

    /// Page size when the client does not ask for one
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Largest page size a client may ask for
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

const fn default_recent_window() -> u64 {
    WeatherRecord::DEFAULT_RECENT_WINDOW_SECS.unsigned_abs()
}

const fn default_page_size() -> u32 {
    10
}

const fn default_max_page_size() -> u32 {
    100
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            recent_window_secs: default_recent_window(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl RecordsConfig {
    /// Build the record service settings; `max_videos` comes from the YouTube section
    #[must_use]
    pub fn to_service_config(&self, max_videos: u8) -> RecordServiceConfig {
        let window = i64::try_from(self.recent_window_secs)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1000);
        let max_page_size = self.max_page_size.max(1);
        RecordServiceConfig {
            recent_window: chrono::Duration::seconds(window),
            max_videos,
            default_page_size: self.default_page_size.clamp(1, max_page_size),
            max_page_size,
        }
    }
}
