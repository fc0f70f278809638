//! Lenient field deserializers shared by the provider DTOs.
//!
//! Upstreams send `null` for text, counts and dates they don't know. Those are
//! read as empty values so one odd record never fails the whole response.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

pub fn deserialize_str<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

pub fn deserialize_count<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(d)?.unwrap_or_default())
}

/// `None` for `null`, non-strings and anything that isn't RFC 3339.
pub fn deserialize_datetime<'de, D>(d: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => DateTime::parse_from_rfc3339(&s)
            .inspect_err(|err| warn!("Failed to parse date '{}'. Err: {err}", s))
            .ok(),
        _ => None,
    })
}
