//! Forgiving field deserializers.
//!
//! The data-access layer hands over records whose fields are not always well
//! shaped. A bad optional field degrades to its default, and a record that is
//! unusable as a whole is skipped, so a single malformed entry cannot abort a
//! whole plan or history.

use jiff::Timestamp;
use jiff::civil::Date;
use jiff::tz::TimeZone;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize an optional timestamp.
///
/// Accepts RFC 3339 timestamps, bare civil dates (`2025-03-14`, taken as
/// UTC midnight) and Unix milliseconds. Anything else becomes `None`.
pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(timestamp_from_value))
}

/// Deserialize a 0–100 progress value, clamping out-of-range numbers.
/// Non-numeric values become `0`.
pub fn progress<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(clamp_progress(
        value.and_then(|v| v.as_f64()).unwrap_or(0.0),
    ))
}

/// Deserialize a boolean flag. Anything but `true` reads as `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(matches!(value, Some(Value::Bool(true))))
}

/// Deserialize any value, falling back to `T::default()` when it does not
/// fit.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default())
}

/// Deserialize a record identifier. Strings are taken as is and integers are
/// rendered in decimal.
pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or integer id, found {other}"
        ))),
    }
}

/// Deserialize a whole-number score. Integral floats such as `12.0` are
/// accepted; fractional or out-of-range numbers are rejected.
pub fn score<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| serde::de::Error::custom(format!("expected a whole-number score, found {value}")))
}

/// Deserialize an optional percentile. Numbers are rounded to the nearest
/// whole percentile; anything outside 0–100 or non-numeric becomes `None`.
pub fn percentile<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.as_f64())
        .filter(|p| (0.0..=100.0).contains(p))
        .map(|p| p.round() as u8))
}

/// Deserialize a list, skipping elements that do not parse as `T`.
/// A value that is not a list at all reads as empty.
pub fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

pub fn clamp_progress(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

fn timestamp_from_value(value: &Value) -> Option<Timestamp> {
    match value {
        Value::String(s) => {
            if let Ok(ts) = s.parse::<Timestamp>() {
                return Some(ts);
            }
            let date = s.parse::<Date>().ok()?;
            date.to_zoned(TimeZone::UTC).ok().map(|z| z.timestamp())
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Timestamp::from_millisecond(millis).ok()),
        _ => None,
    }
}
