//! OpenWeatherMap client
//!
//! HTTP client for the `/weather` and `/forecast` endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::location::LocationQuery;
use crate::models::{CurrentWeatherResponse, ForecastResponse, WeatherReport};

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The API rejected the key
    #[error("Invalid API key. Please check your OpenWeatherMap API key.")]
    InvalidApiKey,

    /// The API does not know the location
    #[error("Location \"{0}\" not found. Please check the spelling and try again.")]
    LocationNotFound(String),

    /// Rate limit exceeded
    #[error("API rate limit exceeded. Please try again later.")]
    RateLimitExceeded,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Request took longer than the configured timeout
    #[error("Request timeout. Please check your internet connection and try again.")]
    Timeout,

    /// Connection to the weather service failed
    #[error("Unable to connect to weather service: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Weather API error: {0}")]
    RequestFailed(String),

    /// Response could not be used
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as `appid`
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Weather client trait for fetching weather data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Fetch current conditions and forecast for a location
    async fn fetch(&self, location: &LocationQuery) -> Result<WeatherReport, WeatherError>;

    /// Check if the weather service is reachable and accepts the key
    async fn is_healthy(&self) -> bool;
}

/// OpenWeatherMap HTTP client implementation
#[derive(Debug)]
pub struct OpenWeatherMapClient {
    client: Client,
    config: WeatherConfig,
}

const USER_AGENT: &str = concat!("Weatherlog/", env!("CARGO_PKG_VERSION"));

impl OpenWeatherMapClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{name}", self.config.base_url.trim_end_matches('/'))
    }

    fn map_status(status: StatusCode, location: &LocationQuery, message: String) -> WeatherError {
        match status {
            StatusCode::UNAUTHORIZED => WeatherError::InvalidApiKey,
            StatusCode::NOT_FOUND => WeatherError::LocationNotFound(location.to_string()),
            StatusCode::TOO_MANY_REQUESTS => WeatherError::RateLimitExceeded,
            s if s.is_server_error() => WeatherError::ServiceUnavailable(format!("HTTP {s}")),
            s => WeatherError::RequestFailed(if message.is_empty() {
                format!("HTTP {s}")
            } else {
                message
            }),
        }
    }

    fn map_transport(e: &reqwest::Error) -> WeatherError {
        if e.is_timeout() {
            WeatherError::Timeout
        } else if e.is_connect() {
            WeatherError::ConnectionFailed(e.to_string())
        } else {
            WeatherError::RequestFailed(e.to_string())
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        location: &LocationQuery,
    ) -> Result<T, WeatherError> {
        let url = self.endpoint(endpoint);
        debug!(url = %url, location = %location, "Sending weather request");

        let mut params = location.query_pairs();
        params.push(("appid", self.config.api_key.clone()));
        params.push(("units", "metric".to_string()));

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| Self::map_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body.get("message")?.as_str().map(str::to_string))
                .unwrap_or_default();
            return Err(Self::map_status(status, location, message));
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherMapClient {
    #[instrument(skip(self), fields(location = %location))]
    async fn fetch(&self, location: &LocationQuery) -> Result<WeatherReport, WeatherError> {
        let (current, forecast) = tokio::try_join!(
            self.get_json::<CurrentWeatherResponse>("weather", location),
            self.get_json::<ForecastResponse>("forecast", location),
        )?;

        let coordinates = current.coord.ok_or_else(|| {
            WeatherError::ParseError("Invalid current weather data received from API".to_string())
        })?;
        let list = forecast.list.ok_or_else(|| {
            WeatherError::ParseError("Invalid forecast data received from API".to_string())
        })?;

        debug!(
            city = %current.name,
            forecast_slots = list.len(),
            "Fetched weather data"
        );

        Ok(WeatherReport {
            coordinates,
            current,
            forecast: list,
            city: forecast.city,
        })
    }

    async fn is_healthy(&self) -> bool {
        let probe = LocationQuery::City("London".to_string());
        match self
            .get_json::<CurrentWeatherResponse>("weather", &probe)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Weather health check failed");
                false
            },
        }
    }
}
