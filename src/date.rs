//! Best-effort date coercion
//!
//! Schema.org consumers expect ISO-8601. Inputs that cannot be parsed are
//! passed through unchanged: validity is advisory, not enforced here.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::node::Node;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse the date shapes hosts commonly hand over. Naive values are UTC.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Coerce a value to a full ISO-8601 UTC timestamp (`2024-01-02T00:00:00.000Z`)
pub fn to_iso(value: &Value) -> Value {
    match value {
        Value::String(s) => match parse_date(s) {
            Some(dt) => Value::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => value.clone(),
        },
        other => other.clone(),
    }
}

/// Coerce a value to a calendar date (`2024-01-02`)
pub fn to_date(value: &Value) -> Value {
    match value {
        Value::String(s) => match parse_date(s) {
            Some(dt) => Value::String(dt.format("%Y-%m-%d").to_string()),
            None => value.clone(),
        },
        other => other.clone(),
    }
}

/// Apply `coerce` to each present key of `node`
pub fn coerce_fields(node: &mut Node, keys: &[&str], coerce: fn(&Value) -> Value) {
    for key in keys {
        if let Some(value) = node.get_mut(*key) {
            *value = coerce(value);
        }
    }
}
