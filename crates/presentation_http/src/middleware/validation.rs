//! Request extraction and validation
//!
//! `ValidatedQuery` validates query strings with the validator crate and
//! `JsonPayload` accepts any well-formed JSON body. A request without a JSON
//! content type or without a body reads as an empty object. Both reject
//! with the standard `ApiError` envelope.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{HeaderMap, header::CONTENT_TYPE, request::Parts},
};
use domain::{ValidationFailure, Violation};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

/// Field tag used when the query string itself cannot be decoded
const QUERY_FIELD: &str = "query";

/// Convert validator errors into field violations, ordered by field name
fn to_failure(errors: &ValidationErrors) -> ValidationFailure {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    let violations = fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                Violation::new(
                    field.to_string(),
                    error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string),
                )
            })
        })
        .collect();

    ValidationFailure::from_violations(violations)
        .unwrap_or_else(|| ValidationFailure::single(QUERY_FIELD, "Invalid query parameters"))
}

/// A query-string extractor that also validates the parameters
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct Paging {
///     #[validate(range(min = 1, max = 100))]
///     limit: Option<u32>,
/// }
///
/// async fn handler(ValidatedQuery(paging): ValidatedQuery<Paging>) {}
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                ApiError::Validation(ValidationFailure::single(QUERY_FIELD, e.body_text()))
            })?;

        value
            .validate()
            .map_err(|e| ApiError::Validation(to_failure(&e)))?;

        Ok(Self(value))
    }
}

/// `application/json` or any `+json` media type
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Raw JSON body; field-level checks happen in the entry validator
#[derive(Debug, Clone, Default)]
pub struct JsonPayload(pub Value);

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Ok(Self(Value::Object(Map::new())));
        }

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON: {}", e.body_text())))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(Value::Object(Map::new())));
        }

        serde_json::from_slice(&body)
            .map(Self)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::StatusCode,
        routing::{get, post},
    };
    use serde::Deserialize;
    use tower::ServiceExt;
    use validator::Validate;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Paging {
        #[validate(range(min = 1, message = "Page must be a positive integer"))]
        page: Option<u32>,
        #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
        limit: Option<u32>,
    }

    async fn paging_handler(ValidatedQuery(paging): ValidatedQuery<Paging>) -> String {
        format!("{:?}/{:?}", paging.page, paging.limit)
    }

    async fn echo_handler(JsonPayload(value): JsonPayload) -> String {
        value.to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/paging", get(paging_handler))
            .route("/echo", post(echo_handler))
    }

    async fn send(request: axum::http::Request<Body>) -> (StatusCode, String) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn get_request(uri: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn valid_query_passes() {
        let (status, body) = send(get_request("/paging?page=2&limit=50")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Some(2)/Some(50)");
    }

    #[tokio::test]
    async fn missing_params_pass() {
        let (status, body) = send(get_request("/paging")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "None/None");
    }

    #[tokio::test]
    async fn out_of_range_limit_lists_field() {
        let (status, body) = send(get_request("/paging?limit=101&page=0")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "Validation failed");
        assert_eq!(json["details"][0]["field"], "limit");
        assert_eq!(json["details"][0]["message"], "Limit must be between 1 and 100");
        assert_eq!(json["details"][1]["field"], "page");
    }

    #[tokio::test]
    async fn undecodable_query_is_rejected() {
        let (status, body) = send(get_request("/paging?page=abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["details"][0]["field"], "query");
    }

    #[tokio::test]
    async fn json_payload_accepts_any_json() {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/echo")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"location":"Paris"}"#))
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"location":"Paris"}"#);
    }

    fn post_echo(content_type: Option<&str>, body: &'static str) -> axum::http::Request<Body> {
        let mut builder = axum::http::Request::builder().method("POST").uri("/echo");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn missing_content_type_reads_as_empty_object() {
        let (status, body) = send(post_echo(None, r#"{"location":"Paris"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "{}");
    }

    #[tokio::test]
    async fn non_json_content_type_reads_as_empty_object() {
        let (status, body) = send(post_echo(Some("text/plain"), "location=Paris")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "{}");
    }

    #[tokio::test]
    async fn empty_json_body_reads_as_empty_object() {
        let (status, body) = send(post_echo(Some("application/json"), "")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "{}");
    }

    #[tokio::test]
    async fn json_media_type_parameters_and_suffixes_are_parsed() {
        let (status, body) = send(post_echo(
            Some("Application/JSON; charset=utf-8"),
            r#"{"a":1}"#,
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"a":1}"#);

        let (status, body) = send(post_echo(Some("application/merge-patch+json"), "[1]")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "[1]");
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/echo")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"location": nope}"#))
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }
}
