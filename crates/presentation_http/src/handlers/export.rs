//! Export handlers
//!
//! Serve stored records as JSON, CSV or Markdown attachments.

use application::{ExportDocument, ExportFormat};
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;

use super::common::parse_record_id;
use crate::{error::ApiError, state::AppState};

/// Export query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExportQuery {
    /// `json` (default), `csv`, `markdown` or `md`; unknown values export JSON
    pub format: Option<String>,
    /// Case-insensitive location substring (collection export only)
    pub location: Option<String>,
}

impl ExportQuery {
    fn format(&self) -> ExportFormat {
        self.format
            .as_deref()
            .map(ExportFormat::parse_lenient)
            .unwrap_or_default()
    }
}

fn attachment(document: ExportDocument) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, document.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", document.filename),
            ),
        ],
        document.body,
    )
}

/// Export every matching record, newest first
#[utoipa::path(
    get,
    path = "/api/export",
    tag = "export",
    params(ExportQuery),
    responses(
        (status = 200, description = "JSON, CSV or Markdown attachment", body = String),
        (status = 404, description = "No records to export", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn export_all(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let document = state
        .exports
        .export_all(query.format(), query.location.as_deref())
        .await?;
    Ok(attachment(document))
}

/// Export a single record
#[utoipa::path(
    get,
    path = "/api/export/{id}",
    tag = "export",
    params(
        ("id" = String, Path, description = "24-character hex record ID"),
        ExportQuery
    ),
    responses(
        (status = 200, description = "JSON, CSV or Markdown attachment", body = String),
        (status = 400, description = "Invalid ID format", body = crate::error::ErrorResponse),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn export_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_record_id(&id)?;
    let document = state.exports.export_one(&id, query.format()).await?;
    Ok(attachment(document))
}
