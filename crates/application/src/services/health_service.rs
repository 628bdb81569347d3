//! Readiness probes for the record database and the weather provider
//!
//! Probes run concurrently, each bounded by the same timeout. Only the
//! database decides overall health.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use domain::{Clock, SystemClock};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::ports::{DatabaseHealthPort, WeatherPort};

const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

const DATABASE: &str = "database";
const WEATHER: &str = "weather";

/// Status of an individual service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    #[must_use]
    pub const fn healthy() -> Self {
        Self {
            healthy: true,
            info: None,
            response_time_ms: None,
            error: None,
        }
    }

    #[must_use]
    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            healthy: false,
            info: None,
            response_time_ms: None,
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub fn timeout() -> Self {
        Self::unhealthy("Health check timed out")
    }

    #[must_use]
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    #[must_use]
    pub const fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }
}

/// Health report across services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// True when every critical service is healthy
    pub healthy: bool,
    pub services: HashMap<String, ServiceHealth>,
    pub checked_at: DateTime<Utc>,
}

impl HealthReport {
    /// Build a report; `critical` names the services that decide overall health
    #[must_use]
    pub fn new(
        services: HashMap<String, ServiceHealth>,
        critical: &[&str],
        checked_at: DateTime<Utc>,
    ) -> Self {
        let healthy = critical
            .iter()
            .all(|name| services.get(*name).is_some_and(|s| s.healthy));

        Self {
            healthy,
            services,
            checked_at,
        }
    }

    #[must_use]
    pub fn service_status(&self, name: &str) -> Option<&ServiceHealth> {
        self.services.get(name)
    }
}

/// Service for aggregating health checks
pub struct HealthService {
    clock: Arc<dyn Clock>,
    probe_timeout: Duration,
    database: Arc<dyn DatabaseHealthPort>,
    weather: Arc<dyn WeatherPort>,
}

impl std::fmt::Debug for HealthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthService")
            .field("probe_timeout", &self.probe_timeout)
            .finish_non_exhaustive()
    }
}

#[allow(clippy::cast_possible_truncation)]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

impl HealthService {
    #[must_use]
    pub fn new(database: Arc<dyn DatabaseHealthPort>, weather: Arc<dyn WeatherPort>) -> Self {
        Self {
            clock: Arc::new(SystemClock),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            database,
            weather,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub const fn with_probe_timeout(mut self, probe_timeout: Duration) -> Self {
        self.probe_timeout = probe_timeout;
        self
    }

    /// Check all services
    #[instrument(skip(self))]
    pub async fn check_all(&self) -> HealthReport {
        let (database, weather) = tokio::join!(self.check_database(), self.check_weather());

        let mut services = HashMap::new();
        services.insert(DATABASE.to_string(), database);
        services.insert(WEATHER.to_string(), weather);

        HealthReport::new(services, &[DATABASE], self.clock.now())
    }

    /// Check database connectivity
    #[instrument(skip(self))]
    pub async fn check_database(&self) -> ServiceHealth {
        let start = Instant::now();
        let result = timeout(
            self.probe_timeout,
            self.database.check_health(),
        )
        .await;

        match result {
            Ok(Ok(health)) => {
                let ms = elapsed_ms(start);
                debug!(response_time_ms = ms, "Database healthy");
                ServiceHealth::healthy()
                    .with_response_time(ms)
                    .with_info(health.engine_version)
            },
            Ok(Err(e)) => {
                warn!(error = %e, "Database health check failed");
                ServiceHealth::unhealthy(e.to_string()).with_response_time(elapsed_ms(start))
            },
            Err(_) => {
                warn!("Database health check timed out");
                ServiceHealth::timeout()
            },
        }
    }

    /// Check weather provider availability
    #[instrument(skip(self))]
    pub async fn check_weather(&self) -> ServiceHealth {
        let start = Instant::now();
        let result = timeout(
            self.probe_timeout,
            self.weather.is_available(),
        )
        .await;

        if let Ok(available) = result {
            let ms = elapsed_ms(start);
            if available {
                debug!(response_time_ms = ms, "Weather service healthy");
                ServiceHealth::healthy().with_response_time(ms)
            } else {
                warn!(response_time_ms = ms, "Weather service unhealthy");
                ServiceHealth::unhealthy("Weather service unavailable").with_response_time(ms)
            }
        } else {
            warn!("Weather health check timed out");
            ServiceHealth::timeout()
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::TimeZone;
    use domain::{FixedClock, WeatherSnapshot};

    use super::*;
    use crate::error::ApplicationError;
    use crate::ports::{DatabaseHealth, MockDatabaseHealthPort, MockWeatherPort};

    fn weather(available: bool) -> Arc<dyn WeatherPort> {
        let mut mock = MockWeatherPort::new();
        mock.expect_is_available().returning(move || available);
        Arc::new(mock)
    }

    fn database(result: Result<DatabaseHealth, ApplicationError>) -> Arc<dyn DatabaseHealthPort> {
        let mut mock = MockDatabaseHealthPort::new();
        let mut slot = Some(result);
        mock.expect_check_health().returning(move || {
            slot.take()
                .unwrap_or_else(|| Ok(DatabaseHealth::new("SQLite 3.45.0", 1)))
        });
        Arc::new(mock)
    }

    #[test]
    fn report_ignores_non_critical_failures() {
        let mut services = HashMap::new();
        services.insert("database".to_string(), ServiceHealth::healthy());
        services.insert("weather".to_string(), ServiceHealth::unhealthy("down"));

        let report = HealthReport::new(services, &["database"], Utc::now());
        assert!(report.healthy);
        assert!(!report.service_status("weather").unwrap().healthy);
    }

    #[test]
    fn report_missing_critical_is_unhealthy() {
        let report = HealthReport::new(HashMap::new(), &["database"], Utc::now());
        assert!(!report.healthy);
    }

    #[tokio::test]
    async fn check_all_healthy() {
        let service = HealthService::new(
            database(Ok(DatabaseHealth::new("SQLite 3.45.0", 1))),
            weather(true),
        );
        let report = service.check_all().await;
        assert!(report.healthy);
        assert_eq!(
            report.service_status("database").unwrap().info.as_deref(),
            Some("SQLite 3.45.0")
        );
    }

    #[tokio::test]
    async fn database_failure_makes_report_unhealthy() {
        let service = HealthService::new(
            database(Err(ApplicationError::Internal("locked".into()))),
            weather(true),
        );
        let report = service.check_all().await;
        assert!(!report.healthy);
        assert!(
            report
                .service_status("database")
                .unwrap()
                .error
                .as_deref()
                .unwrap()
                .contains("locked")
        );
    }

    #[tokio::test]
    async fn weather_outage_is_reported_but_not_critical() {
        let service = HealthService::new(
            database(Ok(DatabaseHealth::new("SQLite 3.45.0", 1))),
            weather(false),
        );
        let report = service.check_all().await;
        assert!(report.healthy);
        assert!(!report.service_status("weather").unwrap().healthy);
    }

    #[tokio::test]
    async fn report_is_stamped_with_injected_clock() {
        let at = Utc.with_ymd_and_hms(2026, 5, 10, 12, 0, 0).unwrap();
        let service = HealthService::new(
            database(Ok(DatabaseHealth::new("SQLite 3.45.0", 1))),
            weather(true),
        )
        .with_clock(Arc::new(FixedClock::new(at)));

        assert_eq!(service.check_all().await.checked_at, at);
    }

    struct StalledWeather;

    #[async_trait]
    impl WeatherPort for StalledWeather {
        async fn fetch_weather(&self, _location: &str) -> Result<WeatherSnapshot, ApplicationError> {
            Err(ApplicationError::Internal("unused".into()))
        }

        async fn is_available(&self) -> bool {
            tokio::time::sleep(Duration::from_secs(30)).await;
            true
        }
    }

    #[tokio::test]
    async fn stalled_probe_times_out() {
        let service = HealthService::new(
            database(Ok(DatabaseHealth::new("SQLite 3.45.0", 1))),
            Arc::new(StalledWeather),
        )
        .with_probe_timeout(Duration::from_millis(20));

        let report = service.check_all().await;
        let weather = report.service_status("weather").unwrap();
        assert!(!weather.healthy);
        assert_eq!(weather.error.as_deref(), Some("Health check timed out"));
        assert!(report.healthy);
    }
}
