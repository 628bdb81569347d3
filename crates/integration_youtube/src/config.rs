//! YouTube search configuration

use serde::{Deserialize, Serialize};

/// Configuration for the YouTube Data API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YouTubeConfig {
    /// API key; searches are skipped when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Safe search level: "none", "moderate", "strict"
    #[serde(default = "default_safe_search")]
    pub safe_search: String,
}

fn default_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_safe_search() -> String {
    "moderate".to_string()
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            safe_search: default_safe_search(),
        }
    }
}

impl YouTubeConfig {
    /// Whether an API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}
