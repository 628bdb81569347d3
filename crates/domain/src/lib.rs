//! Domain layer for Weatherlog
//!
//! Contains the weather record model, value objects, the entry validator
//! and domain errors. This layer performs no I/O.

pub mod clock;
pub mod entities;
pub mod errors;
pub mod validation;
pub mod value_objects;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entities::*;
pub use errors::DomainError;
pub use validation::{
    NewWeatherEntry, ValidationFailure, Violation, WeatherEntryPatch, validate_create_at,
    validate_update_at,
};
pub use value_objects::*;
