//! Domain-level errors

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised when constructing domain values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Identifier is not 24 hex digits
    #[error("Invalid record id: {0}")]
    InvalidRecordId(String),

    #[error("Coordinates out of range: lat {latitude}, lon {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// `end` precedes `start`
    #[error("End date must be after start date ({end} < {start})")]
    ReversedDateRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}
