//! Shared error mapping for the sqlx persistence layer

use application::error::ApplicationError;

/// Map a sqlx error to an application-layer error
pub fn map_sqlx_error(e: sqlx::Error) -> ApplicationError {
    match e {
        sqlx::Error::RowNotFound => ApplicationError::entry_not_found(),
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            ApplicationError::InvalidOperation(format!("Duplicate weather record: {db_err}"))
        },
        sqlx::Error::Database(db_err) => {
            ApplicationError::Internal(format!("Database error: {db_err}"))
        },
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            ApplicationError::Internal("Database unavailable".to_string())
        },
        other => ApplicationError::Internal(format!("Database error: {other}")),
    }
}

/// Map a JSON column (de)serialization failure
pub fn map_json_error(column: &str, e: &serde_json::Error) -> ApplicationError {
    ApplicationError::Internal(format!("Invalid {column} column: {e}"))
}
