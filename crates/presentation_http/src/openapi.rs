//! OpenAPI documentation module
//!
//! Serves the OpenAPI 3 document for the Weatherlog HTTP API at
//! `/api-docs/openapi.json`.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::{Json, Router, routing::get};
use utoipa::{OpenApi, ToSchema};

use crate::{handlers, state::AppState};

/// OpenAPI documentation for Weatherlog
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weatherlog API",
        version = "0.1.0",
        description = "Weather lookup and logging service with validated entries, exports and map/video enrichment",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Liveness and readiness endpoints"),
        (name = "weather", description = "Weather entry management"),
        (name = "export", description = "JSON, CSV and Markdown exports")
    ),
    paths(
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::weather::list_entries,
        handlers::weather::get_entry,
        handlers::weather::create_entry,
        handlers::weather::update_entry,
        handlers::weather::delete_entry,
        handlers::export::export_all,
        handlers::export::export_one,
    ),
    components(
        schemas(
            handlers::health::HealthResponse,
            handlers::health::ReadinessResponse,
            handlers::health::ServiceStatus,
            crate::error::ErrorResponse,
            crate::error::FieldError,
            WeatherEntryRequestSchema,
            WeatherRecordSchema,
            PaginationSchema,
            RecordResponseSchema,
            RecordListSchema,
            DeleteResponseSchema,
            DeletedIdSchema,
        )
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Create or update payload
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase", example = json!({
    "location": "Paris, FR",
    "startDate": "2026-05-08",
    "endDate": "2026-05-10",
    "includeVideoLookup": true,
    "includeMapLookup": true
}))]
#[allow(dead_code)]
pub struct WeatherEntryRequestSchema {
    /// Place name: letters, spaces, commas, periods and hyphens, under 100 characters
    location: String,
    /// ISO 8601 date, not in the future and at most 5 days in the past
    start_date: String,
    /// ISO 8601 date, not before the start date and at most 7 days after it
    end_date: String,
    include_video_lookup: Option<bool>,
    include_map_lookup: Option<bool>,
}

/// Stored weather record
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct WeatherRecordSchema {
    /// 24-character hex ID
    id: String,
    location: String,
    /// `{lat, lon}`
    #[schema(value_type = Object)]
    coordinates: (),
    /// City name, country, timezone offset, sunrise and sunset
    #[schema(value_type = Object)]
    city: (),
    /// `{startDate, endDate}`
    #[schema(value_type = Object)]
    date_range: (),
    #[schema(value_type = Object)]
    current_weather: (),
    #[schema(value_type = Vec<Object>)]
    forecast: (),
    /// Optional `videos` and `maps` enrichments
    #[schema(value_type = Object)]
    additional_data: (),
    created_at: String,
    updated_at: String,
}

/// Listing pagination
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct PaginationSchema {
    current_page: u32,
    total_pages: u64,
    total_entries: u64,
    has_next: bool,
    has_prev: bool,
}

/// Single-record envelope
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct RecordResponseSchema {
    success: bool,
    data: WeatherRecordSchema,
    message: Option<String>,
}

/// Listing envelope
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct RecordListSchema {
    success: bool,
    data: Vec<WeatherRecordSchema>,
    pagination: PaginationSchema,
}

#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct DeletedIdSchema {
    id: String,
}

/// Delete envelope
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct DeleteResponseSchema {
    success: bool,
    message: String,
    data: DeletedIdSchema,
}

/// Route serving the OpenAPI document
pub fn create_openapi_routes() -> Router<AppState> {
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}
