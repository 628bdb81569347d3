//! Route definitions and middleware stack

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::{handlers, middleware::RequestIdLayer, openapi, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Weather entries
        .route(
            "/api/weather",
            get(handlers::weather::list_entries).post(handlers::weather::create_entry),
        )
        .route(
            "/api/weather/{id}",
            get(handlers::weather::get_entry)
                .put(handlers::weather::update_entry)
                .delete(handlers::weather::delete_entry),
        )
        // Exports
        .route("/api/export", get(handlers::export::export_all))
        .route("/api/export/{id}", get(handlers::export::export_one))
        .merge(openapi::create_openapi_routes())
        .with_state(state)
}

/// CORS policy: any origin when none are configured, otherwise the listed ones
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            origin
                .parse::<HeaderValue>()
                .inspect_err(|_| warn!(origin = %origin, "Ignoring invalid CORS origin"))
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Wrap the router in the HTTP middleware stack
///
/// Order from the outside in: request ID, tracing, CORS, body limit.
pub fn apply_middleware(router: Router, config: &ServerConfig) -> Router {
    let router = router.layer(RequestBodyLimitLayer::new(config.max_body_size_json_bytes));
    let router = if config.cors_enabled {
        router.layer(cors_layer(config))
    } else {
        router
    };
    router
        .layer(TraceLayer::new_for_http())
        .layer(RequestIdLayer::new())
}
