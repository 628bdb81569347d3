//! Application layer - Use cases and orchestration
//!
//! Contains the weather record use cases, export rendering and port
//! definitions. Orchestrates domain objects and infrastructure adapters.

pub mod error;
pub mod export;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use export::ExportFormat;
pub use ports::*;
pub use services::*;
