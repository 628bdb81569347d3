//! API error handling
//!
//! Every failure renders as `{"success": false, "error": ...}`. In production
//! mode internal and upstream errors return generic messages without details.

use std::sync::atomic::{AtomicBool, Ordering};

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{DomainError, ValidationFailure};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

const GENERIC_MESSAGE: &str = "An error occurred processing your request";

/// Global flag to control error detail exposure
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Configure whether internal error details are included in responses.
///
/// Production deployments set this to `false` so that database paths,
/// upstream URLs and similar details never reach clients.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// Replace messages that look like they carry paths, URLs or connection details
fn sanitize_error_message(msg: &str, expose: bool) -> String {
    if expose {
        return msg.to_string();
    }

    let sensitive_patterns = [
        "/home/",
        "/Users/",
        "/var/",
        "/etc/",
        "C:\\",
        "sqlite:",
        "panicked at",
        ".rs:",
        "connection refused",
        "timeout",
        "timed out",
    ];

    let msg_lower = msg.to_lowercase();
    if sensitive_patterns
        .iter()
        .any(|pattern| msg_lower.contains(&pattern.to_lowercase()))
        || msg.contains("://")
    {
        return GENERIC_MESSAGE.to_string();
    }

    msg.to_string()
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(ValidationFailure),

    #[error("Invalid ID format")]
    InvalidId,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Bad gateway: {0}")]
    BadGateway(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Field-level validation detail
#[derive(Debug, Serialize, ToSchema)]
pub struct FieldError {
    /// Payload field, or `dateRange` / `object` for cross-field failures
    pub field: String,
    pub message: String,
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "success": false,
    "error": "Validation failed",
    "details": [{"field": "location", "message": "Location is required"}]
}))]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,
    /// Short error summary
    pub error: String,
    /// Longer explanation, when one can be shown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Per-field validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: None,
            details: None,
        }
    }

    fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiError {
    /// Status code and body for this error
    fn render(self, expose: bool) -> (StatusCode, ErrorResponse) {
        match self {
            Self::Validation(failure) => {
                let details = failure
                    .into_violations()
                    .into_iter()
                    .map(|v| FieldError {
                        field: v.field,
                        message: v.message,
                    })
                    .collect();
                let mut body = ErrorResponse::new("Validation failed");
                body.details = Some(details);
                (StatusCode::BAD_REQUEST, body)
            },
            Self::InvalidId => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Invalid ID format")
                    .with_message("The provided ID is not a valid record ID"),
            ),
            Self::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(sanitize_error_message(&msg, expose)),
            ),
            Self::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(sanitize_error_message(&msg, expose)),
            ),
            Self::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorResponse::new("Rate limit exceeded")
                    .with_message("The weather provider is rate limiting requests, try again later"),
            ),
            Self::BadGateway(msg) => {
                let body = ErrorResponse::new("Upstream service error");
                let body = if expose { body.with_message(msg) } else { body };
                (StatusCode::BAD_GATEWAY, body)
            },
            Self::ServiceUnavailable(msg) => {
                let body = ErrorResponse::new("Service temporarily unavailable");
                let body = if expose { body.with_message(msg) } else { body };
                (StatusCode::SERVICE_UNAVAILABLE, body)
            },
            Self::Internal(msg) => {
                let body = ErrorResponse::new("Internal server error");
                let body = if expose { body.with_message(msg) } else { body };
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(msg) = &self {
            error!(error = %msg, "Request failed with internal error");
        }
        let (status, body) = self.render(should_expose_details());
        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(DomainError::InvalidRecordId(_)) => Self::InvalidId,
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::Validation(failure) => Self::Validation(failure),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::RateLimited => Self::RateLimited,
            ApplicationError::ExternalService(msg) => Self::BadGateway(msg),
            ApplicationError::Configuration(msg) => Self::ServiceUnavailable(msg),
            ApplicationError::InvalidOperation(msg) => Self::BadRequest(msg),
            ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApplicationError::Domain(err).into()
    }
}
