//! Weather record identifier
//!
//! Identifiers are 24 lowercase hex digits: four bytes of big-endian Unix
//! seconds followed by eight random bytes, so they sort roughly by creation
//! time.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// Number of hex digits in a record identifier
const RECORD_ID_LEN: usize = 24;

/// Check whether `s` has the shape of a record identifier (`^[0-9a-fA-F]{24}$`)
#[must_use]
pub fn is_valid_record_id(s: &str) -> bool {
    s.len() == RECORD_ID_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// A unique weather record identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Generate a new identifier stamped with `instant`
    #[must_use]
    pub fn generate_at(instant: DateTime<Utc>) -> Self {
        let secs = u32::try_from(instant.timestamp().max(0)).unwrap_or(u32::MAX);
        let random = Uuid::new_v4();
        let tail: String = random.as_bytes()[..8]
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect();
        Self(format!("{secs:08x}{tail}"))
    }

    /// Parse an identifier, normalizing hex digits to lowercase
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRecordId` if `s` is not 24 hex digits.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if !is_valid_record_id(s) {
            return Err(DomainError::InvalidRecordId(s.to_string()));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// The identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RecordId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn generated_ids_have_valid_shape() {
        let id = RecordId::generate_at(Utc::now());
        assert!(is_valid_record_id(id.as_str()));
        assert_eq!(id.as_str(), id.as_str().to_ascii_lowercase());
    }

    #[test]
    fn generated_ids_are_unique() {
        let now = Utc::now();
        assert_ne!(RecordId::generate_at(now), RecordId::generate_at(now));
    }

    #[test]
    fn generated_id_encodes_timestamp() {
        let instant = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let id = RecordId::generate_at(instant);
        let expected = format!("{:08x}", instant.timestamp());
        assert!(id.as_str().starts_with(&expected));
    }

    #[test]
    fn shape_check_accepts_mixed_case_hex() {
        assert!(is_valid_record_id("507f1f77bcf86cd799439011"));
        assert!(is_valid_record_id("507F1F77BCF86CD799439011"));
    }

    #[test]
    fn shape_check_rejects_wrong_length_or_digits() {
        assert!(!is_valid_record_id(""));
        assert!(!is_valid_record_id("507f1f77bcf86cd79943901"));
        assert!(!is_valid_record_id("507f1f77bcf86cd7994390111"));
        assert!(!is_valid_record_id("507f1f77bcf86cd79943901g"));
        assert!(!is_valid_record_id(" 507f1f77bcf86cd79943901"));
    }

    #[test]
    fn parse_normalizes_case() {
        let id = RecordId::parse("507F1F77BCF86CD799439011").unwrap();
        assert_eq!(id.as_str(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn parse_invalid_returns_error() {
        assert!(matches!(
            RecordId::parse("not-an-id"),
            Err(DomainError::InvalidRecordId(_))
        ));
    }

    #[test]
    fn serde_uses_plain_string() {
        let id = RecordId::parse("507f1f77bcf86cd799439011").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"507f1f77bcf86cd799439011\"");
        let back: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<RecordId>("\"bad\"").is_err());
    }
}
