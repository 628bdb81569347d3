//! Video search result model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum description length kept from the API snippet
pub const DESCRIPTION_CHARS: usize = 200;

/// A single video returned by a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResult {
    pub title: String,
    pub video_id: String,
    /// Medium thumbnail, else the default one
    pub thumbnail: Option<String>,
    pub channel_title: String,
    pub published_at: Option<DateTime<Utc>>,
    /// First 200 characters followed by "..."
    pub description: String,
    pub url: String,
}

impl VideoResult {
    /// Watch URL for a video id
    #[must_use]
    pub fn watch_url(video_id: &str) -> String {
        format!("https://www.youtube.com/watch?v={video_id}")
    }

    /// Shorten a snippet description to the stored form
    #[must_use]
    pub fn shorten_description(description: &str) -> String {
        let mut short: String = description.chars().take(DESCRIPTION_CHARS).collect();
        short.push_str("...");
        short
    }
}
