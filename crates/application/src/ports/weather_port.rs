//! Weather provider port

use async_trait::async_trait;
use domain::WeatherSnapshot;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Source of current conditions plus a 5-day, 3-hourly forecast
///
/// Implementations map an unknown location to `ApplicationError::NotFound`
/// and provider throttling to `ApplicationError::RateLimited`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Look up `location`: a city name, a postal code or a `lat,lon` pair
    async fn fetch_weather(&self, location: &str) -> Result<WeatherSnapshot, ApplicationError>;

    /// Lightweight probe used by readiness checks
    async fn is_available(&self) -> bool;
}
