//! Value Objects - Immutable, identity-less domain primitives

pub(crate) mod date_range;
mod geo_location;
mod record_id;

pub use date_range::DateRange;
pub use geo_location::GeoLocation;
pub use record_id::{RecordId, is_valid_record_id};
