//! Inclusive date range attached to a weather record

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A start/end pair with `end_date >= start_date`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
}

impl DateRange {
    /// Create a range
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ReversedDateRange` if `end_date` precedes `start_date`.
    pub fn new(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Result<Self, DomainError> {
        if end_date < start_date {
            return Err(DomainError::ReversedDateRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Start of the range
    #[must_use]
    pub const fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    /// End of the range
    #[must_use]
    pub const fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }
}

/// Round an absolute duration up to whole days, at millisecond precision
pub(crate) fn ceil_days(span: Duration) -> i64 {
    const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
    let millis = span.num_milliseconds().abs();
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}
