//! Weather adapter - Implements WeatherPort using integration_weather

use application::error::ApplicationError;
use application::ports::WeatherPort;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{
    CityInfo, CurrentConditions, ForecastEntry, GeoLocation, WeatherCondition, WeatherSnapshot,
};
use integration_weather::{
    ForecastItem, LocationQuery, OpenWeatherMapClient, WeatherClient, WeatherConfig,
    WeatherDescription, WeatherError, WeatherReport,
};
use tracing::{debug, instrument, warn};

/// Adapter for the OpenWeatherMap API
pub struct WeatherAdapter {
    client: Box<dyn WeatherClient>,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"OpenWeatherMapClient")
            .finish()
    }
}

impl WeatherAdapter {
    /// Create an adapter backed by `OpenWeatherMapClient`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: WeatherConfig) -> Result<Self, ApplicationError> {
        if config.api_key.trim().is_empty() {
            warn!("OpenWeatherMap API key not configured; lookups will be rejected");
        }
        let client = OpenWeatherMapClient::new(config).map_err(Self::map_error)?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing client
    #[must_use]
    pub fn with_client(client: impl WeatherClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::LocationNotFound(_) => ApplicationError::NotFound(err.to_string()),
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
            WeatherError::InvalidApiKey => ApplicationError::Configuration(err.to_string()),
            WeatherError::ParseError(_) => ApplicationError::Internal(err.to_string()),
            WeatherError::ServiceUnavailable(_)
            | WeatherError::Timeout
            | WeatherError::ConnectionFailed(_)
            | WeatherError::RequestFailed(_) => ApplicationError::ExternalService(err.to_string()),
        }
    }

    fn timestamp(secs: i64) -> Result<DateTime<Utc>, ApplicationError> {
        DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| ApplicationError::Internal(format!("Invalid timestamp: {secs}")))
    }

    fn map_conditions(descriptions: Vec<WeatherDescription>) -> Vec<WeatherCondition> {
        descriptions
            .into_iter()
            .map(|d| WeatherCondition {
                id: d.id,
                main: d.main,
                description: d.description,
                icon: d.icon,
            })
            .collect()
    }

    fn map_forecast(item: ForecastItem) -> Result<ForecastEntry, ApplicationError> {
        Ok(ForecastEntry {
            forecast_at: Self::timestamp(item.dt)?,
            temperature: item.main.temp,
            feels_like: item.main.feels_like,
            temp_min: item.main.temp_min,
            temp_max: item.main.temp_max,
            pressure: item.main.pressure,
            humidity: item.main.humidity,
            wind_speed: item.wind.speed,
            precipitation_probability: item.pop,
            conditions: Self::map_conditions(item.weather),
        })
    }

    /// Convert the provider report into the domain snapshot
    fn map_report(report: WeatherReport) -> Result<WeatherSnapshot, ApplicationError> {
        let coordinates = GeoLocation::new(report.coordinates.lat, report.coordinates.lon)?;
        let current = report.current;

        let sunrise = current.sys.sunrise.map(Self::timestamp).transpose()?;
        let sunset = current.sys.sunset.map(Self::timestamp).transpose()?;
        let city = CityInfo {
            name: if report.city.name.is_empty() {
                current.name
            } else {
                report.city.name
            },
            country: report
                .city
                .country
                .or(current.sys.country)
                .unwrap_or_default(),
            timezone_offset: report.city.timezone,
            sunrise,
            sunset,
        };

        let current_weather = CurrentConditions {
            observed_at: Self::timestamp(current.dt)?,
            temperature: current.main.temp,
            feels_like: current.main.feels_like,
            temp_min: current.main.temp_min,
            temp_max: current.main.temp_max,
            pressure: current.main.pressure,
            humidity: current.main.humidity,
            wind_speed: current.wind.speed,
            wind_direction: current.wind.deg,
            visibility: current.visibility,
            cloudiness: current.clouds.all,
            conditions: Self::map_conditions(current.weather),
        };

        let forecast = report
            .forecast
            .into_iter()
            .map(Self::map_forecast)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(WeatherSnapshot {
            coordinates,
            city,
            current: current_weather,
            forecast,
        })
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self))]
    async fn fetch_weather(&self, location: &str) -> Result<WeatherSnapshot, ApplicationError> {
        let query = LocationQuery::parse(location);
        let report = self.client.fetch(&query).await.map_err(|e| {
            warn!(error = %e, query = %query, "Weather lookup failed");
            Self::map_error(e)
        })?;

        let snapshot = Self::map_report(report)?;
        debug!(
            city = %snapshot.city.name,
            forecast_entries = snapshot.forecast.len(),
            "Retrieved weather"
        );
        Ok(snapshot)
    }

    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
