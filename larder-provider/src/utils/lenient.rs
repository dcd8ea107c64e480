//! Tolerant scalar deserializers.
//!
//! Backends disagree on scalar types: relational ids arrive as integers,
//! CMS decimals arrive as strings, unset fields arrive as `null`. These
//! helpers normalize all of them into the canonical record field types.

use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    String(String),
    I64(i64),
    U64(u64),
    F64(f64),
    Bool(bool),
}

/// `String` fields that may arrive as numbers or `null`.
pub mod string {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Scalar;

    pub fn serialize<S>(value: &str, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Scalar>::deserialize(deserializer)? {
            Some(Scalar::String(s)) => s,
            Some(Scalar::I64(n)) => n.to_string(),
            Some(Scalar::U64(n)) => n.to_string(),
            Some(Scalar::F64(n)) => n.to_string(),
            Some(Scalar::Bool(b)) => b.to_string(),
            None => String::new(),
        })
    }
}

/// `f64` fields that may arrive as numeric strings or `null`.
///
/// Blank strings and `null` read as `0.0`.
pub mod number {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Scalar;

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(*value)
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        match Option::<Scalar>::deserialize(deserializer)? {
            Some(Scalar::String(s)) if s.trim().is_empty() => Ok(0.0),
            Some(Scalar::String(s)) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| Error::custom(format!("Invalid number '{s}': {e}"))),
            Some(Scalar::I64(n)) => Ok(n as f64),
            Some(Scalar::U64(n)) => Ok(n as f64),
            Some(Scalar::F64(n)) => Ok(n),
            Some(Scalar::Bool(_)) => Err(Error::custom("Expected a number, found a boolean")),
            None => Ok(0.0),
        }
    }
}
