//! Integration configurations: OpenWeatherMap, YouTube, Google Maps.

use integration_weather::WeatherConfig;
use integration_youtube::YouTubeConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

fn redacted(secret: Option<&SecretString>) -> Option<&'static str> {
    secret.map(|_| "[REDACTED]")
}

// ==============================
// Weather Configuration
// ==============================

/// OpenWeatherMap configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherAppConfig {
    /// API base URL
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for WeatherAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl std::fmt::Debug for WeatherAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAppConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &redacted(self.api_key.as_ref()))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl WeatherAppConfig {
    /// Get the API key as a string reference
    #[must_use]
    pub fn api_key_str(&self) -> Option<&str> {
        self.api_key.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Client configuration for the OpenWeatherMap integration
    #[must_use]
    pub fn to_client_config(&self) -> WeatherConfig {
        WeatherConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key_str().unwrap_or_default().to_string(),
            timeout_secs: self.timeout_secs,
        }
    }
}

// ==============================
// YouTube Configuration
// ==============================

/// YouTube Data API configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct YouTubeAppConfig {
    /// API base URL
    #[serde(default = "default_youtube_base_url")]
    pub base_url: String,

    /// API key; video lookup is skipped without one
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Videos attached to a record
    #[serde(default = "default_max_results")]
    pub max_results: u8,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_youtube_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

const fn default_max_results() -> u8 {
    5
}

impl Default for YouTubeAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_youtube_base_url(),
            api_key: None,
            max_results: default_max_results(),
            timeout_secs: default_timeout(),
        }
    }
}

impl std::fmt::Debug for YouTubeAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeAppConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &redacted(self.api_key.as_ref()))
            .field("max_results", &self.max_results)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl YouTubeAppConfig {
    /// Get the API key as a string reference
    #[must_use]
    pub fn api_key_str(&self) -> Option<&str> {
        self.api_key.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Client configuration for the YouTube integration
    #[must_use]
    pub fn to_client_config(&self) -> YouTubeConfig {
        YouTubeConfig {
            api_key: self.api_key_str().map(str::to_string),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            ..YouTubeConfig::default()
        }
    }
}

// ==============================
// Maps Configuration
// ==============================

/// Google Maps configuration
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct MapsAppConfig {
    /// API key; keyless links are generated without one
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
}

impl std::fmt::Debug for MapsAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapsAppConfig")
            .field("api_key", &redacted(self.api_key.as_ref()))
            .finish()
    }
}

impl MapsAppConfig {
    /// Get the API key as a string reference
    #[must_use]
    pub fn api_key_str(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|k| !k.trim().is_empty())
    }
}
