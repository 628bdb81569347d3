//! Weatherlog HTTP presentation layer
//!
//! This crate provides the REST API for weather entries and exports.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::{ApiError, set_expose_internal_errors};
pub use middleware::{JsonPayload, RequestId, RequestIdLayer, ValidatedQuery};
pub use routes::{apply_middleware, create_router};
pub use state::AppState;
