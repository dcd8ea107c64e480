//! Datetime serialization/deserialization helpers.
//!
//! - Serialization: `DateTime<Utc>` -> RFC3339 string
//! - Deserialization: RFC3339 string, naive ISO-8601 string (read as UTC)
//!   or Unix timestamp -> `DateTime<Utc>`

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Serializes `DateTime<Utc>` as an RFC3339 string.
pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339())
}

/// Deserializes `DateTime<Utc>` from RFC3339, naive ISO-8601 or a Unix timestamp.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match TimestampOrString::deserialize(deserializer)? {
        TimestampOrString::String(s) => parse_datetime_str(&s)
            .ok_or_else(|| Error::custom(format!("Invalid timestamp: {s}"))),
        TimestampOrString::I64(ts) => {
            parse_unix_timestamp(ts).ok_or_else(|| Error::custom("Invalid Unix timestamp"))
        }
        TimestampOrString::U64(ts) => parse_unix_timestamp(ts.cast_signed())
            .ok_or_else(|| Error::custom("Invalid Unix timestamp")),
    }
}

/// `Option<DateTime<Utc>>` serializer/deserializer helpers.
///
/// `null` and the empty string both read as `None`.
pub mod option {
    use super::{DateTime, Deserialize, Deserializer, Serializer, TimestampOrString, Utc};
    use super::{parse_datetime_str, parse_unix_timestamp};

    /// Serializes `Option<DateTime<Utc>>` as RFC3339 or `null`.
    pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match dt {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes `Option<DateTime<Utc>>`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        match Option::<TimestampOrString>::deserialize(deserializer)? {
            Some(TimestampOrString::String(s)) if s.trim().is_empty() => Ok(None),
            Some(TimestampOrString::String(s)) => parse_datetime_str(&s)
                .map(Some)
                .ok_or_else(|| Error::custom(format!("Invalid timestamp: {s}"))),
            Some(TimestampOrString::I64(ts)) => parse_unix_timestamp(ts)
                .map(Some)
                .ok_or_else(|| Error::custom("Invalid Unix timestamp")),
            Some(TimestampOrString::U64(ts)) => parse_unix_timestamp(ts.cast_signed())
                .map(Some)
                .ok_or_else(|| Error::custom("Invalid Unix timestamp")),
            None => Ok(None),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TimestampOrString {
    String(String),
    I64(i64),
    U64(u64),
}

/// Parses RFC3339 first, then a zone-less ISO-8601 timestamp (as written by
/// `timestamp without time zone` columns) interpreted as UTC.
fn parse_datetime_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Parses a Unix timestamp with second/millisecond auto-detection.
fn parse_unix_timestamp(ts: i64) -> Option<DateTime<Utc>> {
    // Values larger than 10^11 are interpreted as milliseconds.
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}
