//! Entry validator - Checks and normalizes weather-entry payloads
//!
//! Validation runs in two passes. The structural pass checks every
//! recognized field independently and reports all violations in field
//! order. Only when it succeeds does the business pass run, which stops
//! at the first failing cross-field rule.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::ValidateLength;

use super::{
    dates::parse_iso_datetime,
    violation::{ValidationFailure, Violation},
};
use crate::value_objects::date_range::ceil_days;

/// Longest accepted location after trimming
const MAX_LOCATION_CHARS: u64 = 100;
/// How far back a start date may reach
const MAX_LOOKBACK_DAYS: i64 = 5;
/// Longest accepted range, in whole days rounded up
const MAX_RANGE_DAYS: i64 = 7;

const FIELD_LOCATION: &str = "location";
const FIELD_START_DATE: &str = "startDate";
const FIELD_END_DATE: &str = "endDate";
const FIELD_VIDEO_LOOKUP: &str = "includeVideoLookup";
const FIELD_MAP_LOOKUP: &str = "includeMapLookup";
const ALIAS_VIDEO_LOOKUP: &str = "includeYouTube";
const ALIAS_MAP_LOOKUP: &str = "includeMaps";

/// A validated creation payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWeatherEntry {
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub include_video_lookup: bool,
    pub include_map_lookup: bool,
}

/// A validated update payload; `None` fields were not supplied
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherEntryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_video_lookup: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_map_lookup: Option<bool>,
}

impl WeatherEntryPatch {
    /// True when no field was supplied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.location.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.include_video_lookup.is_none()
            && self.include_map_lookup.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Create,
    Update,
}

/// Structural pass output; absent fields are `None`
#[derive(Debug, Default)]
struct Checked {
    location: Option<String>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    include_video_lookup: Option<bool>,
    include_map_lookup: Option<bool>,
    recognized: usize,
}

/// Validate a creation payload against a fixed instant
///
/// # Errors
///
/// Returns the collected violations if the payload is rejected.
pub fn validate_create_at(
    payload: &Value,
    now: DateTime<Utc>,
) -> Result<NewWeatherEntry, ValidationFailure> {
    let checked = structural_pass(payload, Mode::Create, now)?;

    // Create mode reports every missing required field, so all three are set here.
    let (Some(location), Some(start_date), Some(end_date)) =
        (checked.location, checked.start_date, checked.end_date)
    else {
        return Err(ValidationFailure::single(
            Violation::OBJECT,
            "Required fields are missing",
        ));
    };

    check_date_window(start_date, end_date, now)?;
    check_location_chars(&location)?;

    Ok(NewWeatherEntry {
        location,
        start_date,
        end_date,
        include_video_lookup: checked.include_video_lookup.unwrap_or(false),
        include_map_lookup: checked.include_map_lookup.unwrap_or(false),
    })
}

/// Validate an update payload against a fixed instant
///
/// # Errors
///
/// Returns the collected violations if the payload is rejected.
pub fn validate_update_at(
    payload: &Value,
    now: DateTime<Utc>,
) -> Result<WeatherEntryPatch, ValidationFailure> {
    let checked = structural_pass(payload, Mode::Update, now)?;

    if checked.recognized == 0 {
        return Err(ValidationFailure::single(
            Violation::OBJECT,
            "At least one field must be provided for update",
        ));
    }

    if let (Some(start), Some(end)) = (checked.start_date, checked.end_date) {
        check_date_window(start, end, now)?;
    }
    if let Some(location) = &checked.location {
        check_location_chars(location)?;
    }

    Ok(WeatherEntryPatch {
        location: checked.location,
        start_date: checked.start_date,
        end_date: checked.end_date,
        include_video_lookup: checked.include_video_lookup,
        include_map_lookup: checked.include_map_lookup,
    })
}

fn structural_pass(
    payload: &Value,
    mode: Mode,
    now: DateTime<Utc>,
) -> Result<Checked, ValidationFailure> {
    let Some(object) = payload.as_object() else {
        return Err(ValidationFailure::single(
            Violation::OBJECT,
            "Request body must be a JSON object",
        ));
    };

    let mut violations = Vec::new();
    let mut checked = Checked::default();

    if let Some(value) = object.get(FIELD_LOCATION) {
        checked.recognized += 1;
        checked.location = check_location(value, mode, &mut violations);
    } else if mode == Mode::Create {
        violations.push(Violation::new(FIELD_LOCATION, "Location is required"));
    }

    if let Some(value) = object.get(FIELD_START_DATE) {
        checked.recognized += 1;
        checked.start_date = check_date(value, DateField::Start, now, None, &mut violations);
    } else if mode == Mode::Create {
        violations.push(Violation::new(FIELD_START_DATE, "Start date is required"));
    }

    if let Some(value) = object.get(FIELD_END_DATE) {
        checked.recognized += 1;
        checked.end_date = check_date(
            value,
            DateField::End,
            now,
            checked.start_date,
            &mut violations,
        );
    } else if mode == Mode::Create {
        violations.push(Violation::new(FIELD_END_DATE, "End date is required"));
    }

    if let Some((key, value)) = lookup_flag(object, FIELD_VIDEO_LOOKUP, ALIAS_VIDEO_LOOKUP) {
        checked.recognized += 1;
        checked.include_video_lookup = check_flag(key, value, &mut violations);
    }
    if let Some((key, value)) = lookup_flag(object, FIELD_MAP_LOOKUP, ALIAS_MAP_LOOKUP) {
        checked.recognized += 1;
        checked.include_map_lookup = check_flag(key, value, &mut violations);
    }

    match ValidationFailure::from_violations(violations) {
        Some(failure) => Err(failure),
        None => Ok(checked),
    }
}

fn check_location(value: &Value, mode: Mode, violations: &mut Vec<Violation>) -> Option<String> {
    let Some(raw) = value.as_str() else {
        violations.push(Violation::new(FIELD_LOCATION, "Location must be a string"));
        return None;
    };

    let trimmed = raw.trim_matches(is_js_whitespace);
    if trimmed.is_empty() {
        let message = match mode {
            Mode::Create => "Location is required",
            Mode::Update => "Location cannot be empty",
        };
        violations.push(Violation::new(FIELD_LOCATION, message));
        return None;
    }

    if !trimmed.validate_length(None, Some(MAX_LOCATION_CHARS), None) {
        violations.push(Violation::new(
            FIELD_LOCATION,
            "Location must be less than 100 characters",
        ));
        return None;
    }

    Some(trimmed.to_string())
}

#[derive(Debug, Clone, Copy)]
enum DateField {
    Start,
    End,
}

impl DateField {
    const fn key(self) -> &'static str {
        match self {
            Self::Start => FIELD_START_DATE,
            Self::End => FIELD_END_DATE,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Start => "Start date",
            Self::End => "End date",
        }
    }
}

fn check_date(
    value: &Value,
    field: DateField,
    now: DateTime<Utc>,
    not_before: Option<DateTime<Utc>>,
    violations: &mut Vec<Violation>,
) -> Option<DateTime<Utc>> {
    let label = field.label();
    let Some(raw) = value.as_str() else {
        violations.push(Violation::new(
            field.key(),
            format!("{label} must be a valid date"),
        ));
        return None;
    };
    let Some(parsed) = parse_iso_datetime(raw) else {
        violations.push(Violation::new(
            field.key(),
            format!("{label} must be in ISO format"),
        ));
        return None;
    };

    if not_before.is_some_and(|start| parsed < start) {
        violations.push(Violation::new(
            field.key(),
            format!("{label} must be after start date"),
        ));
    }
    if parsed > now {
        violations.push(Violation::new(
            field.key(),
            format!("{label} cannot be in the future"),
        ));
    }

    Some(parsed)
}

/// Find a flag under its name or its legacy alias, preferring the name
fn lookup_flag<'a>(
    object: &'a Map<String, Value>,
    name: &'static str,
    alias: &'static str,
) -> Option<(&'static str, &'a Value)> {
    object
        .get(name)
        .map(|v| (name, v))
        .or_else(|| object.get(alias).map(|v| (alias, v)))
}

/// JSON booleans, or the strings `"true"` and `"false"` in any case
fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) if text.eq_ignore_ascii_case("true") => Some(true),
        Value::String(text) if text.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

fn check_flag(key: &str, value: &Value, violations: &mut Vec<Violation>) -> Option<bool> {
    let flag = parse_flag(value);
    if flag.is_none() {
        violations.push(Violation::new(key, format!("{key} must be a boolean value")));
    }
    flag
}

fn check_date_window(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), ValidationFailure> {
    if start < now - Duration::days(MAX_LOOKBACK_DAYS) {
        return Err(ValidationFailure::single(
            FIELD_START_DATE,
            "Start date cannot be more than 5 days in the past",
        ));
    }
    if ceil_days(end - start) > MAX_RANGE_DAYS {
        return Err(ValidationFailure::single(
            Violation::DATE_RANGE,
            "Date range cannot be more than 7 days",
        ));
    }
    Ok(())
}

/// Whitespace and line terminators as JavaScript's `trim` and `\s` see them
///
/// Unlike [`char::is_whitespace`] this includes U+FEFF and excludes U+0085.
const fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Letters, whitespace, comma, period and hyphen only
fn is_location_char(c: char) -> bool {
    c.is_ascii_alphabetic() || is_js_whitespace(c) || matches!(c, ',' | '.' | '-')
}

fn check_location_chars(location: &str) -> Result<(), ValidationFailure> {
    if location.is_empty() || !location.chars().all(is_location_char) {
        return Err(ValidationFailure::single(
            FIELD_LOCATION,
            "Location contains invalid characters",
        ));
    }
    Ok(())
}
