//! Lenient parsing for values reported by the upstream census snapshot.
//!
//! Counters and dates arrive loosely typed: numbers may be encoded as text,
//! fields may be `null`, and dates use more than one layout. Malformed values
//! never surface as errors; counters fall back to zero and dates to "absent".

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parses a non-negative counter from text, returning 0 when unparsable.
///
/// Surrounding whitespace and `,` thousands separators are tolerated.
#[must_use]
pub fn parse_count(text: &str) -> u64 {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<u64>().unwrap_or(0)
}

/// Parses an MCS-150 form date, returning `None` when the layout is unknown.
#[must_use]
pub fn parse_form_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|datetime| datetime.date())
        })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count_from_value(value: &Value) -> u64 {
    match value {
        Value::Number(number) => number.as_u64().unwrap_or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map_or(0, |f| f as u64)
        }),
        Value::String(text) => parse_count(text),
        _ => 0,
    }
}

pub(crate) fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(0, count_from_value))
}

pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    })
}
