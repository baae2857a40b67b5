use std::collections::HashMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A bind variable value.
///
/// Sequence values ([`BindValue::List`]) are expanded into IN-lists by
/// the gateway and get a doubled-colon reference token during query
/// translation; everything else is a scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BindValue {
    /// SQL NULL.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer beyond the i64 range.
    UInt(u64),
    /// Floating point.
    Float(f64),
    /// UTF-8 string.
    Str(String),
    /// Raw bytes.
    Bytes(Bytes),
    /// Sequence, expanded as an IN-list on the wire.
    List(Vec<BindValue>),
}

/// Mapping from bind variable name to value.
pub type BindVars = HashMap<String, BindValue>;

impl BindValue {
    /// Whether this value is a sequence (drives the `::name` rewrite).
    pub fn is_sequence(&self) -> bool {
        matches!(self, BindValue::List(_))
    }
}

impl From<bool> for BindValue {
    fn from(v: bool) -> Self {
        BindValue::Bool(v)
    }
}

impl From<i32> for BindValue {
    fn from(v: i32) -> Self {
        BindValue::Int(v as i64)
    }
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        BindValue::Int(v)
    }
}

impl From<u64> for BindValue {
    fn from(v: u64) -> Self {
        BindValue::UInt(v)
    }
}

impl From<f64> for BindValue {
    fn from(v: f64) -> Self {
        BindValue::Float(v)
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        BindValue::Str(v.to_string())
    }
}

impl From<String> for BindValue {
    fn from(v: String) -> Self {
        BindValue::Str(v)
    }
}

impl From<Vec<u8>> for BindValue {
    fn from(v: Vec<u8>) -> Self {
        BindValue::Bytes(Bytes::from(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_detection() {
        assert!(BindValue::List(vec![BindValue::Int(1)]).is_sequence());
        assert!(!BindValue::Int(1).is_sequence());
        assert!(!BindValue::Str("a,b".into()).is_sequence());
    }

    #[test]
    fn test_serializes_untagged() {
        let value = serde_json::to_value(BindValue::Int(42)).unwrap();
        assert_eq!(value, serde_json::json!(42));

        let value = serde_json::to_value(BindValue::Null).unwrap();
        assert!(value.is_null());

        let value =
            serde_json::to_value(BindValue::List(vec![BindValue::Int(1), BindValue::Int(2)]))
                .unwrap();
        assert_eq!(value, serde_json::json!([1, 2]));
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(BindValue::from("x"), BindValue::Str("x".into()));
        assert_eq!(BindValue::from(7i64), BindValue::Int(7));
        assert_eq!(BindValue::from(true), BindValue::Bool(true));
    }
}
