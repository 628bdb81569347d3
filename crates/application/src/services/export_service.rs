//! Export service - Renders stored weather records as downloadable documents

use std::sync::Arc;

use domain::{Clock, RecordId};
use tracing::{info, instrument};

use crate::error::ApplicationError;
use crate::export::{
    ExportFormat, format_timestamp, render_csv, render_json, render_json_single, render_markdown,
};
use crate::ports::{RecordFilter, RecordQuery, SortField, SortOrder, WeatherRecordStore};

/// A rendered export ready to be sent as an attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub filename: String,
    pub content_type: &'static str,
    pub body: String,
}

/// Use cases for exporting records
pub struct ExportService {
    clock: Arc<dyn Clock>,
    store: Arc<dyn WeatherRecordStore>,
}

impl std::fmt::Debug for ExportService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportService").finish_non_exhaustive()
    }
}

impl ExportService {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, store: Arc<dyn WeatherRecordStore>) -> Self {
        Self { clock, store }
    }

    /// Export every record matching `location`, newest first
    #[instrument(skip(self))]
    pub async fn export_all(
        &self,
        format: ExportFormat,
        location: Option<&str>,
    ) -> Result<ExportDocument, ApplicationError> {
        let query = RecordQuery {
            filter: RecordFilter::by_location(location),
            sort_by: SortField::CreatedAt,
            order: SortOrder::Desc,
            offset: 0,
            limit: None,
        };
        let records = self.store.list(&query).await?;
        if records.is_empty() {
            return Err(ApplicationError::NotFound(
                "No weather data found to export".to_string(),
            ));
        }

        let now = self.clock.now();
        let body = match format {
            ExportFormat::Json => render_json(&records, now)?,
            ExportFormat::Csv => render_csv(&records)?,
            ExportFormat::Markdown => render_markdown(&records, now),
        };

        info!(count = records.len(), format = format.extension(), "Exported weather records");
        Ok(ExportDocument {
            filename: format!(
                "weather-data-{}.{}",
                filename_timestamp(&format_timestamp(now)),
                format.extension()
            ),
            content_type: format.content_type(),
            body,
        })
    }

    /// Export a single record
    #[instrument(skip(self), fields(id = %id))]
    pub async fn export_one(
        &self,
        id: &RecordId,
        format: ExportFormat,
    ) -> Result<ExportDocument, ApplicationError> {
        let record = self
            .store
            .get(id)
            .await?
            .ok_or_else(ApplicationError::entry_not_found)?;

        let now = self.clock.now();
        let body = match format {
            ExportFormat::Json => render_json_single(&record, now)?,
            ExportFormat::Csv => render_csv(std::slice::from_ref(&record))?,
            ExportFormat::Markdown => render_markdown(std::slice::from_ref(&record), now),
        };

        Ok(ExportDocument {
            filename: format!(
                "weather-entry-{id}-{}.{}",
                filename_timestamp(&format_timestamp(now)),
                format.extension()
            ),
            content_type: format.content_type(),
            body,
        })
    }
}

/// Make a timestamp safe for use in a filename
fn filename_timestamp(timestamp: &str) -> String {
    timestamp.replace([':', '.'], "-")
}
