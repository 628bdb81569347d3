//! Application services - Use case implementations

mod export_service;
mod health_service;
mod weather_record_service;

pub use export_service::{ExportDocument, ExportService};
pub use health_service::{HealthReport, HealthService, ServiceHealth};
pub use weather_record_service::{
    CreateOutcome, ListParams, Pagination, RecordPage, RecordServiceConfig, WeatherRecordService,
};
