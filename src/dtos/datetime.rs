//! Timestamp formatting shared by every response DTO
//!
//! Dates go out as `YYYY-MM-DD HH:MM:SS`. Incoming dates are accepted in that
//! shape, as `YYYY-MM-DDTHH:MM[:SS]`, as RFC 3339, or as a bare date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serializer;

pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

pub fn format(value: &NaiveDateTime) -> String {
    value.format(DISPLAY_FORMAT).to_string()
}

pub fn parse(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for format in INPUT_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `serialize_with` helper for timestamp fields
pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}
