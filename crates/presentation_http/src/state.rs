//! Application state shared across handlers

use std::sync::Arc;

use application::{ExportService, HealthService, WeatherRecordService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Weather record use cases
    pub records: Arc<WeatherRecordService>,
    /// Export rendering
    pub exports: Arc<ExportService>,
    /// Readiness checks
    pub health: Arc<HealthService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
