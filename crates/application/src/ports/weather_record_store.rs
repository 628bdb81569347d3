//! Weather record storage port
//!
//! Defines the interface for persisting and querying weather records.

use async_trait::async_trait;
use domain::{DateRange, RecordId, WeatherRecord};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Field to sort record listings by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Location,
    StartDate,
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Desc,
    Asc,
}

/// Filter shared by listing, counting and export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Case-insensitive substring match on the stored location
    pub location: Option<String>,
}

impl RecordFilter {
    /// Filter by location substring, ignoring blank input
    #[must_use]
    pub fn by_location(location: Option<&str>) -> Self {
        Self {
            location: location
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(ToString::to_string),
        }
    }
}

/// A page request against the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordQuery {
    pub filter: RecordFilter,
    pub sort_by: SortField,
    pub order: SortOrder,
    pub offset: u64,
    /// `None` returns every matching record
    pub limit: Option<u64>,
}

/// Port for weather record persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherRecordStore: Send + Sync {
    /// Insert a new record
    async fn save(&self, record: &WeatherRecord) -> Result<(), ApplicationError>;

    /// Get a record by ID
    async fn get(&self, id: &RecordId) -> Result<Option<WeatherRecord>, ApplicationError>;

    /// Replace a stored record
    ///
    /// Returns false if no record with that ID exists.
    async fn update(&self, record: &WeatherRecord) -> Result<bool, ApplicationError>;

    /// Delete a record
    ///
    /// Returns false if no record with that ID exists.
    async fn delete(&self, id: &RecordId) -> Result<bool, ApplicationError>;

    /// List records matching a query
    async fn list(&self, query: &RecordQuery) -> Result<Vec<WeatherRecord>, ApplicationError>;

    /// Count records matching a filter
    async fn count(&self, filter: &RecordFilter) -> Result<u64, ApplicationError>;

    /// Find a record for `location` (case-insensitive) whose stored range
    /// contains `range`
    async fn find_covering(
        &self,
        location: &str,
        range: &DateRange,
    ) -> Result<Option<WeatherRecord>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn WeatherRecordStore) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn WeatherRecordStore>();
    }

    #[test]
    fn sort_field_parses_camel_case() {
        let field: SortField = serde_json::from_str("\"startDate\"").unwrap();
        assert_eq!(field, SortField::StartDate);
        assert_eq!(SortField::default(), SortField::CreatedAt);
    }

    #[test]
    fn sort_order_defaults_to_desc() {
        assert_eq!(SortOrder::default(), SortOrder::Desc);
        let order: SortOrder = serde_json::from_str("\"asc\"").unwrap();
        assert_eq!(order, SortOrder::Asc);
    }

    #[test]
    fn blank_location_filter_is_ignored() {
        assert_eq!(RecordFilter::by_location(Some("  ")).location, None);
        assert_eq!(
            RecordFilter::by_location(Some(" lon ")).location.as_deref(),
            Some("lon")
        );
    }
}
