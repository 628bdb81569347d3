//! Domain entities - Objects with identity and lifecycle

mod enrichment;
pub(crate) mod weather_data;
mod weather_record;

pub use enrichment::{AdditionalData, MapLinks, VideoLink};
pub use weather_data::{
    CityInfo, CurrentConditions, ForecastEntry, WeatherCondition, WeatherSnapshot,
};
pub use weather_record::WeatherRecord;
