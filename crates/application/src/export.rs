//! Export rendering for weather records
//!
//! Renders records as pretty JSON, CSV or Markdown documents.

use std::fmt::Write as _;

use chrono::{DateTime, SecondsFormat, Utc};
use domain::WeatherRecord;
use serde::Serialize;

use crate::error::ApplicationError;

/// Number of forecast slots listed per record in Markdown
const MARKDOWN_FORECAST_SLOTS: usize = 5;

const CSV_HEADERS: [&str; 14] = [
    "ID",
    "Location",
    "Latitude",
    "Longitude",
    "Start Date",
    "End Date",
    "Current Temperature (°C)",
    "Feels Like (°C)",
    "Humidity (%)",
    "Pressure (hPa)",
    "Wind Speed (m/s)",
    "Weather Description",
    "Created At",
    "Updated At",
];

/// Supported export formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
    Markdown,
}

impl ExportFormat {
    /// Parse a format name case-insensitively; unknown names fall back to JSON
    #[must_use]
    pub fn parse_lenient(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "csv" => Self::Csv,
            "markdown" | "md" => Self::Markdown,
            _ => Self::Json,
        }
    }

    /// File extension without the dot
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Markdown => "md",
        }
    }

    /// MIME type of the rendered document
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
            Self::Markdown => "text/markdown",
        }
    }
}

/// RFC 3339 timestamp with milliseconds and a `Z` suffix
#[must_use]
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn format_day(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkEnvelope<'a> {
    success: bool,
    exported_at: String,
    total_entries: usize,
    data: &'a [WeatherRecord],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SingleEnvelope<'a> {
    success: bool,
    exported_at: String,
    data: &'a WeatherRecord,
}

/// Render all records as a pretty-printed JSON envelope
pub fn render_json(
    records: &[WeatherRecord],
    exported_at: DateTime<Utc>,
) -> Result<String, ApplicationError> {
    let envelope = BulkEnvelope {
        success: true,
        exported_at: format_timestamp(exported_at),
        total_entries: records.len(),
        data: records,
    };
    serde_json::to_string_pretty(&envelope)
        .map_err(|e| ApplicationError::Internal(format!("JSON export failed: {e}")))
}

/// Render one record as a pretty-printed JSON envelope
pub fn render_json_single(
    record: &WeatherRecord,
    exported_at: DateTime<Utc>,
) -> Result<String, ApplicationError> {
    let envelope = SingleEnvelope {
        success: true,
        exported_at: format_timestamp(exported_at),
        data: record,
    };
    serde_json::to_string_pretty(&envelope)
        .map_err(|e| ApplicationError::Internal(format!("JSON export failed: {e}")))
}

/// Render records as CSV with a header row
pub fn render_csv(records: &[WeatherRecord]) -> Result<String, ApplicationError> {
    let csv_error = |e: csv::Error| ApplicationError::Internal(format!("CSV export failed: {e}"));

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS).map_err(csv_error)?;
    for record in records {
        let current = &record.current_weather;
        writer
            .write_record([
                record.id.to_string(),
                record.location.clone(),
                record.coordinates.latitude().to_string(),
                record.coordinates.longitude().to_string(),
                format_day(record.date_range.start_date()),
                format_day(record.date_range.end_date()),
                current.temperature.to_string(),
                current.feels_like.to_string(),
                current.humidity.to_string(),
                current.pressure.to_string(),
                current.wind_speed.to_string(),
                current.description().to_string(),
                format_timestamp(record.created_at),
                format_timestamp(record.updated_at),
            ])
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ApplicationError::Internal(format!("CSV export failed: {e}")))?;
    let mut out = String::from_utf8(bytes)
        .map_err(|e| ApplicationError::Internal(format!("CSV export failed: {e}")))?;
    // No trailing newline after the last row.
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}

/// Render records as a Markdown report
#[must_use]
pub fn render_markdown(records: &[WeatherRecord], generated_at: DateTime<Utc>) -> String {
    if records.is_empty() {
        return "# Weather Data Export\n\nNo data available.".to_string();
    }

    let mut md = String::from("# Weather Data Export\n\n");
    let _ = write!(md, "Generated on: {}\n\n", format_timestamp(generated_at));
    let _ = write!(md, "Total entries: {}\n\n", records.len());

    for (index, record) in records.iter().enumerate() {
        let current = &record.current_weather;
        let _ = write!(md, "## {}. {}\n\n", index + 1, record.location);
        let _ = writeln!(
            md,
            "- **Coordinates:** {}, {}",
            record.coordinates.latitude(),
            record.coordinates.longitude()
        );
        let _ = writeln!(
            md,
            "- **Date Range:** {} to {}",
            format_day(record.date_range.start_date()),
            format_day(record.date_range.end_date())
        );
        let _ = writeln!(
            md,
            "- **Current Temperature:** {}°C (feels like {}°C)",
            current.temperature, current.feels_like
        );
        let _ = writeln!(md, "- **Weather:** {}", current.description());
        let _ = writeln!(md, "- **Humidity:** {}%", current.humidity);
        let _ = writeln!(md, "- **Pressure:** {} hPa", current.pressure);
        let _ = writeln!(md, "- **Wind Speed:** {} m/s", current.wind_speed);
        let _ = writeln!(md, "- **Created:** {}", format_timestamp(record.created_at));
        let _ = write!(
            md,
            "- **Updated:** {}\n\n",
            format_timestamp(record.updated_at)
        );

        if !record.forecast.is_empty() {
            md.push_str("### 5-Day Forecast\n\n");
            for slot in record.forecast.iter().take(MARKDOWN_FORECAST_SLOTS) {
                let _ = writeln!(
                    md,
                    "- **{}:** {}°C, {}",
                    format_day(slot.forecast_at),
                    slot.temperature,
                    slot.description()
                );
            }
            md.push('\n');
        }

        let videos = &record.additional_data.videos;
        if !videos.is_empty() {
            md.push_str("### Related Videos\n\n");
            for video in videos {
                let _ = writeln!(
                    md,
                    "- [{}](https://www.youtube.com/watch?v={})",
                    video.title, video.video_id
                );
            }
            md.push('\n');
        }

        md.push_str("---\n\n");
    }

    md
}
