//! Weatherlog HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use application::{
    ExportService, HealthService, WeatherRecordService,
    ports::{DatabaseHealthPort, WeatherPort, WeatherRecordStore},
};
use domain::{Clock, SystemClock};
use infrastructure::{
    AppConfig, AsyncDatabase, GoogleMapsAdapter, SqliteDatabaseHealth, SqliteWeatherRecordStore,
    TelemetryConfig, WeatherAdapter, YouTubeAdapter, init_telemetry,
};
use presentation_http::{AppState, apply_middleware, create_router, set_expose_internal_errors};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    init_telemetry(&TelemetryConfig {
        log_filter: config.telemetry.log_filter.clone(),
        json: config.server.json_logs(),
    })?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.environment,
        "Weatherlog starting"
    );

    set_expose_internal_errors(config.expose_internal_errors());

    // Persistence
    let database = AsyncDatabase::new(&(&config.database).into())
        .await
        .context("Failed to open database")?;
    if config.database.run_migrations {
        database
            .migrate()
            .await
            .context("Failed to run database migrations")?;
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store: Arc<dyn WeatherRecordStore> =
        Arc::new(SqliteWeatherRecordStore::new(database.pool().clone()));
    let database_health: Arc<dyn DatabaseHealthPort> =
        Arc::new(SqliteDatabaseHealth::new(database.pool().clone()));

    // Integrations
    let weather: Arc<dyn WeatherPort> = Arc::new(
        WeatherAdapter::new(config.weather.to_client_config())
            .context("Failed to initialize weather client")?,
    );

    let mut records = WeatherRecordService::new(
        Arc::clone(&clock),
        Arc::clone(&store),
        Arc::clone(&weather),
    )
    .with_config(config.records.to_service_config(config.youtube.max_results))
    .with_maps(Arc::new(GoogleMapsAdapter::new(config.maps.api_key_str())));

    if config.youtube.api_key_str().is_some() {
        let youtube = YouTubeAdapter::new(config.youtube.to_client_config())
            .context("Failed to initialize YouTube client")?;
        records = records.with_videos(Arc::new(youtube));
    } else {
        warn!("YouTube API key not configured; video lookups disabled");
    }

    let state = AppState {
        records: Arc::new(records),
        exports: Arc::new(ExportService::new(Arc::clone(&clock), Arc::clone(&store))),
        health: Arc::new(
            HealthService::new(database_health, weather)
                .with_clock(Arc::clone(&clock))
                .with_probe_timeout(config.server.readiness_timeout()),
        ),
    };

    let app = apply_middleware(create_router(state), &config.server);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(address = %addr, "Server listening");
    info!(url = %format!("http://{addr}/api-docs/openapi.json"), "API docs");

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    database.close().await;
    info!("Server shutdown complete");

    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }

    info!(timeout = ?timeout, "Waiting for open connections to close");
}
