//! The Value type - a tree-shaped settings value.
//!
//! Block settings are dynamically typed: a block service declares which
//! kinds each option accepts, and the stored or caller-supplied values are
//! checked against those kinds at resolution time.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A settings map: option name to value.
///
/// Used both for raw settings (as stored on a block or supplied by a caller)
/// and for normalized settings (after schema resolution).
pub type Settings = BTreeMap<String, Value>;

/// A tree-shaped value stored in block settings.
///
/// # Design Notes
///
/// - Uses `BTreeMap` for deterministic ordering (important for cache keys, comparison)
/// - Uses `i64` for integers; no implicit coercion between strings and numbers
/// - Serializes untagged, so it maps one-to-one onto JSON
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence of values.
    Array(Vec<Value>),
    /// Key-value map with string keys.
    Map(BTreeMap<String, Value>),
}

/// The kind of a [`Value`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    Array,
    Map,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Map => "map",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Create an empty map.
    pub fn map() -> Self {
        Value::Map(BTreeMap::new())
    }

    /// Create an empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Map(_) => ValueKind::Map,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key when this value is a map.
    ///
    /// Returns `None` for missing keys and for non-map values.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?.get(key)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{:?}", self),
        }
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<Settings> for Value {
    fn from(v: Settings) -> Self {
        Value::Map(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    // Fallback for very large numbers
                    Value::String(n.to_string())
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Build a [`Settings`] map from a JSON object.
///
/// Anything other than an object yields an empty map.
pub fn settings_from_json(json: serde_json::Value) -> Settings {
    match Value::from(json) {
        Value::Map(map) => map,
        _ => Settings::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_literals::btree;
    use serde_json::json;

    #[test]
    fn kinds_match_variants() {
        assert_eq!(Value::Null.kind(), ValueKind::Null);
        assert_eq!(Value::from(false).kind(), ValueKind::Bool);
        assert_eq!(Value::from(3i64).kind(), ValueKind::Integer);
        assert_eq!(Value::from(0.5).kind(), ValueKind::Float);
        assert_eq!(Value::from("x").kind(), ValueKind::String);
        assert_eq!(Value::array().kind(), ValueKind::Array);
        assert_eq!(Value::map().kind(), ValueKind::Map);
    }

    #[test]
    fn json_numbers_keep_integer_kind() {
        assert_eq!(Value::from(json!(1)), Value::Integer(1));
        assert_eq!(Value::from(json!(1.5)), Value::Float(1.5));
        assert_eq!(Value::from(json!("1")), Value::String("1".into()));
    }

    #[test]
    fn nested_json_object_converts() {
        let value = Value::from(json!({"attr": {"class": "wide"}, "ttl": 30}));
        assert_eq!(
            value,
            Value::Map(btree! {
                "attr".into() => Value::Map(btree! {
                    "class".into() => Value::from("wide"),
                }),
                "ttl".into() => Value::Integer(30),
            })
        );
        assert_eq!(value.get("ttl"), Some(&Value::Integer(30)));
        assert_eq!(value.get("missing"), None);
    }

    #[test]
    fn settings_from_non_object_is_empty() {
        assert!(settings_from_json(json!([1, 2])).is_empty());
        assert_eq!(settings_from_json(json!({"a": true})).len(), 1);
    }

    #[test]
    fn deserializes_untagged() {
        let value: Value = serde_json::from_str(r#"{"template": false, "ttl": 0}"#).unwrap();
        assert_eq!(value.get("template"), Some(&Value::Bool(false)));
        assert_eq!(value.get("ttl").and_then(Value::as_i64), Some(0));
    }

    #[test]
    fn display_is_json() {
        let value = Value::Map(btree! { "template".into() => Value::from("a.html") });
        assert_eq!(value.to_string(), r#"{"template":"a.html"}"#);
        assert_eq!(ValueKind::Map.to_string(), "map");
    }
}
