//! Property-based tests for the entry validator and value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use chrono::{DateTime, Duration, TimeZone, Utc};
use domain::validation::{validate_create_at, validate_update_at};
use domain::value_objects::{GeoLocation, RecordId, is_valid_record_id};
use proptest::prelude::*;
use serde_json::{Value, json};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 10, 12, 0, 0).unwrap()
}

fn valid_dates() -> (String, String) {
    (
        (now() - Duration::days(2)).to_rfc3339(),
        (now() - Duration::hours(1)).to_rfc3339(),
    )
}

fn payload(location: &str) -> Value {
    let (start, end) = valid_dates();
    json!({"location": location, "startDate": start, "endDate": end})
}

// ============================================================================
// Location Property Tests
// ============================================================================

mod location_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_locations_accepted_trimmed(
            core in "[A-Za-z][A-Za-z ,.-]{0,97}[A-Za-z]",
            lead in " {0,3}",
            trail in " {0,3}",
        ) {
            let raw = format!("{lead}{core}{trail}");
            let entry = validate_create_at(&payload(&raw), now());
            prop_assert!(entry.is_ok());
            prop_assert_eq!(entry.unwrap().location, raw.trim());
        }

        #[test]
        fn digit_locations_fail_only_format_check(
            prefix in "[A-Za-z]{0,2}",
            digit in "[0-9]",
            suffix in "[A-Za-z]{0,2}",
        ) {
            let raw = format!("{prefix}{digit}{suffix}");
            let failure = validate_create_at(&payload(&raw), now()).unwrap_err();
            prop_assert_eq!(failure.violations().len(), 1);
            prop_assert_eq!(&failure.violations()[0].field, "location");
            prop_assert_eq!(
                &failure.violations()[0].message,
                "Location contains invalid characters"
            );
        }

        #[test]
        fn overlong_locations_rejected(extra in 1usize..50) {
            let raw = "a".repeat(100 + extra);
            let failure = validate_create_at(&payload(&raw), now()).unwrap_err();
            prop_assert_eq!(
                &failure.violations()[0].message,
                "Location must be less than 100 characters"
            );
        }

        #[test]
        fn location_only_update_succeeds(core in "[A-Za-z][A-Za-z ,.-]{0,40}") {
            let patch = validate_update_at(&json!({"location": core}), now()).unwrap();
            prop_assert_eq!(patch.location.as_deref(), Some(core.trim()));
            prop_assert!(patch.start_date.is_none());
            prop_assert!(patch.end_date.is_none());
        }
    }
}

// ============================================================================
// Date Property Tests
// ============================================================================

mod date_tests {
    use super::*;

    proptest! {
        #[test]
        fn reversed_ranges_rejected_on_end_date(
            start_back_mins in 1i64..(4 * 24 * 60),
            gap_mins in 1i64..(24 * 60),
        ) {
            let start = now() - Duration::minutes(start_back_mins);
            let end = start - Duration::minutes(gap_mins);
            let failure = validate_create_at(
                &json!({"location": "Oslo", "startDate": start.to_rfc3339(), "endDate": end.to_rfc3339()}),
                now(),
            )
            .unwrap_err();
            prop_assert!(failure.violations().iter().all(|v| v.field == "endDate"));
            prop_assert!(failure
                .violations()
                .iter()
                .any(|v| v.message == "End date must be after start date"));
        }

        #[test]
        fn future_end_rejected_structurally(ahead_mins in 1i64..(30 * 24 * 60)) {
            let start = now() - Duration::days(1);
            let end = now() + Duration::minutes(ahead_mins);
            let failure = validate_create_at(
                &json!({"location": "Oslo", "startDate": start.to_rfc3339(), "endDate": end.to_rfc3339()}),
                now(),
            )
            .unwrap_err();
            prop_assert_eq!(failure.violations().len(), 1);
            prop_assert_eq!(&failure.violations()[0].message, "End date cannot be in the future");
        }

        #[test]
        fn starts_beyond_lookback_rejected(extra_mins in 1i64..(24 * 60)) {
            let start = now() - Duration::days(5) - Duration::minutes(extra_mins);
            let end = start + Duration::hours(1);
            let failure = validate_create_at(
                &json!({"location": "Oslo", "startDate": start.to_rfc3339(), "endDate": end.to_rfc3339()}),
                now(),
            )
            .unwrap_err();
            prop_assert_eq!(failure.violations().len(), 1);
            prop_assert_eq!(&failure.violations()[0].field, "startDate");
            prop_assert_eq!(
                &failure.violations()[0].message,
                "Start date cannot be more than 5 days in the past"
            );
        }
    }

    #[test]
    fn start_six_days_ago_single_violation() {
        let start = now() - Duration::days(6);
        let failure = validate_create_at(
            &json!({
                "location": "Oslo",
                "startDate": start.to_rfc3339(),
                "endDate": (start + Duration::days(1)).to_rfc3339(),
            }),
            now(),
        )
        .unwrap_err();
        assert_eq!(failure.violations().len(), 1);
        assert_eq!(failure.violations()[0].field, "startDate");
    }

    #[test]
    fn empty_update_rejected_with_single_violation() {
        let failure = validate_update_at(&json!({}), now()).unwrap_err();
        assert_eq!(failure.violations().len(), 1);
        assert_eq!(failure.violations()[0].field, "object");
        assert_eq!(
            failure.violations()[0].message,
            "At least one field must be provided for update"
        );
    }
}

// ============================================================================
// Idempotence Property Tests
// ============================================================================

mod idempotence_tests {
    use super::*;

    proptest! {
        #[test]
        fn normalized_output_revalidates_identically(
            core in "[A-Za-z][A-Za-z ,.-]{0,30}[A-Za-z]",
            start_back_secs in 0i64..(5 * 24 * 3600),
            span_secs in 0i64..(5 * 24 * 3600),
            video in any::<bool>(),
            maps in any::<bool>(),
        ) {
            let start = now() - Duration::seconds(start_back_secs);
            let end = (start + Duration::seconds(span_secs)).min(now());
            let first = validate_create_at(
                &json!({
                    "location": format!(" {core} "),
                    "startDate": start.to_rfc3339(),
                    "endDate": end.to_rfc3339(),
                    "includeVideoLookup": video,
                    "includeMapLookup": maps,
                    "extra": "ignored",
                }),
                now(),
            )
            .unwrap();
            let again = serde_json::to_value(&first).unwrap();
            let second = validate_create_at(&again, now()).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}

// ============================================================================
// Value Object Property Tests
// ============================================================================

mod value_object_tests {
    use super::*;

    proptest! {
        #[test]
        fn hex_ids_of_length_24_are_valid(id in "[0-9a-fA-F]{24}") {
            prop_assert!(is_valid_record_id(&id));
            let parsed = RecordId::parse(&id).unwrap();
            prop_assert_eq!(parsed.as_str(), id.to_ascii_lowercase());
        }

        #[test]
        fn other_lengths_are_invalid(id in "[0-9a-f]{0,23}|[0-9a-f]{25,40}") {
            prop_assert!(!is_valid_record_id(&id));
        }

        #[test]
        fn valid_coordinates_create_location(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let loc = GeoLocation::new(lat, lon);
            prop_assert!(loc.is_ok());
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![(-1000.0f64..-90.1f64), (90.1f64..1000.0f64)],
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(GeoLocation::new(lat, lon).is_err());
        }
    }
}
