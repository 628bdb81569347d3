//! Weather record handlers
//!
//! CRUD endpoints under `/api/weather`. Payloads are passed as raw JSON to
//! the entry validator; path IDs are checked before any store access.

use application::{ListParams, SortField, SortOrder};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use domain::WeatherRecord;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::IntoParams;
use validator::Validate;

use super::common::{ApiResponse, parse_record_id};
use crate::{
    error::ApiError,
    middleware::{JsonPayload, ValidatedQuery},
    state::AppState,
};

/// Listing query parameters
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListWeatherQuery {
    /// Page number, starting at 1
    #[validate(range(min = 1, message = "Page must be a positive integer"))]
    pub page: Option<u32>,
    /// Entries per page (1-100, default 10)
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<u32>,
    /// Case-insensitive substring of the stored location
    #[validate(length(max = 100, message = "Location filter must be at most 100 characters"))]
    pub location: Option<String>,
    /// `createdAt`, `updatedAt`, `location` or `startDate`
    #[param(value_type = Option<String>)]
    pub sort_by: Option<SortField>,
    /// `asc` or `desc`
    #[param(value_type = Option<String>)]
    pub sort_order: Option<SortOrder>,
}

impl From<ListWeatherQuery> for ListParams {
    fn from(query: ListWeatherQuery) -> Self {
        Self {
            page: query.page,
            limit: query.limit,
            location: query.location,
            sort_by: query.sort_by.unwrap_or_default(),
            order: query.sort_order.unwrap_or_default(),
        }
    }
}

/// Payload of a delete response
#[derive(Debug, Serialize)]
pub struct DeletedId {
    pub id: String,
}

/// List stored weather records
#[utoipa::path(
    get,
    path = "/api/weather",
    tag = "weather",
    params(ListWeatherQuery),
    responses(
        (status = 200, description = "One page of records", body = crate::openapi::RecordListSchema),
        (status = 400, description = "Invalid query parameters", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_entries(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListWeatherQuery>,
) -> Result<Json<ApiResponse<Vec<WeatherRecord>>>, ApiError> {
    let page = state.records.list(query.into()).await?;
    Ok(Json(
        ApiResponse::data(page.records).with_pagination(page.pagination),
    ))
}

/// Fetch one weather record
#[utoipa::path(
    get,
    path = "/api/weather/{id}",
    tag = "weather",
    params(("id" = String, Path, description = "24-character hex record ID")),
    responses(
        (status = 200, description = "The record", body = crate::openapi::RecordResponseSchema),
        (status = 400, description = "Invalid ID format", body = crate::error::ErrorResponse),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<WeatherRecord>>, ApiError> {
    let id = parse_record_id(&id)?;
    let record = state.records.get(&id).await?;
    Ok(Json(ApiResponse::data(record)))
}

/// Look up weather for a location and store it
///
/// Returns 200 with the stored record when a recent record already covers
/// the requested location and dates.
#[utoipa::path(
    post,
    path = "/api/weather",
    tag = "weather",
    request_body = crate::openapi::WeatherEntryRequestSchema,
    responses(
        (status = 201, description = "Record created", body = crate::openapi::RecordResponseSchema),
        (status = 200, description = "Recent record returned", body = crate::openapi::RecordResponseSchema),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 404, description = "Location not found", body = crate::error::ErrorResponse),
        (status = 429, description = "Weather provider rate limit", body = crate::error::ErrorResponse),
        (status = 502, description = "Weather provider failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn create_entry(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<ApiResponse<WeatherRecord>>), ApiError> {
    let outcome = state.records.create(&payload).await?;

    if outcome.cached {
        return Ok((
            StatusCode::OK,
            Json(ApiResponse::data(outcome.record).with_message("Returning cached weather data")),
        ));
    }

    info!(id = %outcome.record.id, "Weather entry created");
    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::data(outcome.record).with_message("Weather entry created successfully"),
        ),
    ))
}

/// Update a stored record and refresh its weather
#[utoipa::path(
    put,
    path = "/api/weather/{id}",
    tag = "weather",
    params(("id" = String, Path, description = "24-character hex record ID")),
    request_body = crate::openapi::WeatherEntryRequestSchema,
    responses(
        (status = 200, description = "Record updated", body = crate::openapi::RecordResponseSchema),
        (status = 400, description = "Invalid ID or payload", body = crate::error::ErrorResponse),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<ApiResponse<WeatherRecord>>, ApiError> {
    let id = parse_record_id(&id)?;
    let record = state.records.update(&id, &payload).await?;
    Ok(Json(
        ApiResponse::data(record).with_message("Weather entry updated successfully"),
    ))
}

/// Delete a stored record
#[utoipa::path(
    delete,
    path = "/api/weather/{id}",
    tag = "weather",
    params(("id" = String, Path, description = "24-character hex record ID")),
    responses(
        (status = 200, description = "Record deleted", body = crate::openapi::DeleteResponseSchema),
        (status = 400, description = "Invalid ID format", body = crate::error::ErrorResponse),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedId>>, ApiError> {
    let id = parse_record_id(&id)?;
    state.records.delete(&id).await?;
    Ok(Json(
        ApiResponse::data(DeletedId { id: id.to_string() })
            .with_message("Weather entry deleted successfully"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_defaults_map_to_list_params() {
        let params = ListParams::from(ListWeatherQuery::default());
        assert_eq!(params.page, None);
        assert_eq!(params.sort_by, SortField::CreatedAt);
        assert_eq!(params.order, SortOrder::Desc);
    }

    #[test]
    fn query_parses_camel_case_sort_keys() {
        let query: ListWeatherQuery =
            serde_json::from_value(serde_json::json!({"sortBy": "startDate", "sortOrder": "asc"}))
                .unwrap();
        let params = ListParams::from(query);
        assert_eq!(params.sort_by, SortField::StartDate);
        assert_eq!(params.order, SortOrder::Asc);
    }

    #[test]
    fn limit_bounds_are_validated() {
        let query = ListWeatherQuery {
            limit: Some(0),
            ..ListWeatherQuery::default()
        };
        assert!(query.validate().is_err());

        let query = ListWeatherQuery {
            limit: Some(100),
            page: Some(3),
            ..ListWeatherQuery::default()
        };
        assert!(query.validate().is_ok());
    }
}
