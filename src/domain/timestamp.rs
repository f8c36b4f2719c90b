//! Lenient ISO-8601 timestamp parsing for backend payloads.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parses an ISO-8601 timestamp as sent by the backend.
///
/// Accepts RFC 3339 values (`2024-03-01T09:30:00Z`, with optional fractional
/// seconds or offset) and offset-less values (`2024-03-01T09:30:00.123456`),
/// which are read as UTC. Returns `None` for anything else.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}
