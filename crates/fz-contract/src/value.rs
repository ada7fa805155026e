// SPDX-License-Identifier: MIT OR Apache-2.0
//! Dynamically-typed payload values.
//!
//! Generated payloads must be able to deliberately violate their declared
//! [`crate::TypeTag`] (NaN where a number is expected, bytes that are not
//! valid UTF-8, objects where a string is expected). `serde_json::Value`
//! cannot represent all of that (no NaN, no raw bytes), so payload values
//! are carried in this tagged variant instead and only projected to JSON
//! when a parameter's location is `body`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A dynamically-typed value produced by the semantic generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PayloadValue {
    /// The JSON `null` / an absent value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed 64-bit integer.
    Int(i64),
    /// A floating point number, including NaN and +/-infinity.
    Float(f64),
    /// Text. May intentionally be malformed for its declared type.
    Text(String),
    /// Raw bytes, not necessarily valid UTF-8 (e.g. a NUL byte injection).
    Bytes(Vec<u8>),
    /// A JSON-object-shaped value: ordered key/value pairs.
    Object(Vec<(String, PayloadValue)>),
    /// A JSON-array-shaped value.
    Array(Vec<PayloadValue>),
}

impl PayloadValue {
    /// Shorthand for [`PayloadValue::Text`].
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Project this value into a [`serde_json::Value`] for use as a JSON
    /// request body. `Bytes` that are not valid UTF-8 are lossily converted
    /// (deliberately — the point of a NUL-byte or binary-garbage payload is
    /// to see how the target's JSON decoder reacts, not to crash ours).
    /// `Float` NaN/Infinity, which JSON cannot represent, are projected to
    /// their nearest textual form so the wire payload still carries intent.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(i) => serde_json::Value::from(*i),
            Self::Float(f) => {
                serde_json::Number::from_f64(*f).map_or_else(
                    || serde_json::Value::String(f.to_string()),
                    serde_json::Value::Number,
                )
            }
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::Bytes(b) => serde_json::Value::String(String::from_utf8_lossy(b).into_owned()),
            Self::Object(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Self::Array(items) => {
                serde_json::Value::Array(items.iter().map(PayloadValue::to_json).collect())
            }
        }
    }

    /// Render this value as a string suitable for a query string, header,
    /// or path-substitution slot. Bytes are lossily decoded as UTF-8.
    #[must_use]
    pub fn to_wire_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => s.clone(),
            Self::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
            Self::Object(_) | Self::Array(_) => self.to_json().to_string(),
        }
    }

    /// Length used by boundary checks: character count for text, byte
    /// count for bytes, `0` for everything else.
    #[must_use]
    pub fn effective_length(&self) -> usize {
        match self {
            Self::Text(s) => s.chars().count(),
            Self::Bytes(b) => b.len(),
            _ => 0,
        }
    }
}

impl From<String> for PayloadValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for PayloadValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for PayloadValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for PayloadValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for PayloadValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl fmt::Display for PayloadValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_wire_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_projects_to_string_in_json() {
        let v = PayloadValue::Float(f64::NAN);
        let json = v.to_json();
        assert!(json.is_string());
    }

    #[test]
    fn finite_float_projects_to_number() {
        let v = PayloadValue::Float(3.5);
        assert!(v.to_json().is_number());
    }

    #[test]
    fn bytes_project_lossily() {
        let v = PayloadValue::Bytes(vec![0xFF, 0x00, b'a']);
        let s = v.to_wire_string();
        assert!(s.contains('a'));
    }

    #[test]
    fn effective_length_counts_chars_not_bytes() {
        let v = PayloadValue::text("héllo");
        assert_eq!(v.effective_length(), 5);
    }
}
