//! Serde helpers for loosely typed upstream values.
//!
//! Normalized XML carries every scalar as a string and every singleton
//! element as a bare value, so typed schemas need two adapters: parse a
//! number from its text, and accept one element where a list is expected.
//! MaStR JSON sometimes encodes integers as `32.0`; [`integral`] accepts those.

use std::fmt::Display;
use std::str::FromStr;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{Number, Value};

/// Deserialize a list from either a list or a single element.
///
/// `null` and an absent field (with `#[serde(default)]`) both give an empty
/// list. Element errors are reported as-is, e.g. ``missing field `quantity` ``.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        many @ Value::Array(_) => serde_json::from_value(many).map_err(de::Error::custom),
        one => serde_json::from_value(one)
            .map(|item| vec![item])
            .map_err(de::Error::custom),
    }
}

/// Deserialize a value from its textual form, e.g. `"42"` into `u32`.
pub fn from_text<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let text = String::deserialize(deserializer)?;
    text.trim()
        .parse()
        .map_err(|e| de::Error::custom(format!("invalid value '{}': {}", text, e)))
}

/// Deserialize an `i64` from an integer or an integral float such as `32.0`.
pub fn integral<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    to_i64(&number)
}

/// Optional variant of [`integral`]; `null` gives `None`.
pub fn integral_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Number>::deserialize(deserializer)?
        .map(|number| to_i64(&number))
        .transpose()
}

fn to_i64<E: de::Error>(number: &Number) -> Result<i64, E> {
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }
    number
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| f as i64)
        .ok_or_else(|| E::custom(format!("expected an integer, got {}", number)))
}
