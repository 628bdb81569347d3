//! Input validation for weather-entry payloads

mod dates;
mod entry_validator;
mod violation;

pub use dates::parse_iso_datetime;
pub use entry_validator::{
    NewWeatherEntry, WeatherEntryPatch, validate_create_at, validate_update_at,
};
pub use violation::{ValidationFailure, Violation};
