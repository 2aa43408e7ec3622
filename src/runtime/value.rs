//! Loosely typed data model values.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RuntimeError;

/// The data store: element name to value. Keys are never validated.
pub type DataModel = HashMap<String, CmiValue>;

/// A scalar held under a data model element.
///
/// Content may store text, numbers or booleans under any key, so the store
/// keeps whatever scalar it was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CmiValue {
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    String(String),
}

impl CmiValue {
    /// The text, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CmiValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CmiValue::Null)
    }
}

/// Renders the value as a JavaScript host would stringify it.
impl fmt::Display for CmiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CmiValue::Null => f.write_str("null"),
            CmiValue::Bool(b) => write!(f, "{}", b),
            CmiValue::Integer(n) => write!(f, "{}", n),
            CmiValue::Number(n) => write!(f, "{}", n),
            CmiValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CmiValue {
    fn from(s: &str) -> Self {
        CmiValue::String(s.to_string())
    }
}

impl From<String> for CmiValue {
    fn from(s: String) -> Self {
        CmiValue::String(s)
    }
}

impl From<bool> for CmiValue {
    fn from(b: bool) -> Self {
        CmiValue::Bool(b)
    }
}

impl From<i64> for CmiValue {
    fn from(n: i64) -> Self {
        CmiValue::Integer(n)
    }
}

impl From<usize> for CmiValue {
    fn from(n: usize) -> Self {
        CmiValue::Integer(n as i64)
    }
}

impl From<f64> for CmiValue {
    fn from(n: f64) -> Self {
        CmiValue::Number(n)
    }
}

impl<T: Into<CmiValue>> From<Option<T>> for CmiValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CmiValue::Null)
    }
}

impl TryFrom<serde_json::Value> for CmiValue {
    type Error = RuntimeError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(CmiValue::Null),
            Value::Bool(b) => Ok(CmiValue::Bool(b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(CmiValue::Integer(i)),
                None => n
                    .as_f64()
                    .map(CmiValue::Number)
                    .ok_or_else(|| RuntimeError::InvalidValue(n.to_string())),
            },
            Value::String(s) => Ok(CmiValue::String(s)),
            other @ (Value::Array(_) | Value::Object(_)) => {
                Err(RuntimeError::InvalidValue(other.to_string()))
            }
        }
    }
}

/// Parse a JSON object of scalars into a data model.
pub fn data_model_from_json(json: &str) -> crate::Result<DataModel> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_like_javascript() {
        assert_eq!(CmiValue::Null.to_string(), "null");
        assert_eq!(CmiValue::Bool(true).to_string(), "true");
        assert_eq!(CmiValue::Integer(3).to_string(), "3");
        assert_eq!(CmiValue::Number(0.5).to_string(), "0.5");
        assert_eq!(CmiValue::Number(1.0).to_string(), "1");
        assert_eq!(CmiValue::from("passed").to_string(), "passed");
    }

    #[test]
    fn test_deserialize_scalars() {
        let data = data_model_from_json(
            r#"{"a": null, "b": false, "c": 7, "d": 0.25, "e": "incomplete"}"#,
        )
        .unwrap();

        assert_eq!(data["a"], CmiValue::Null);
        assert_eq!(data["b"], CmiValue::Bool(false));
        assert_eq!(data["c"], CmiValue::Integer(7));
        assert_eq!(data["d"], CmiValue::Number(0.25));
        assert_eq!(data["e"], CmiValue::from("incomplete"));
    }

    #[test]
    fn test_deserialize_rejects_nested() {
        assert!(data_model_from_json(r#"{"a": [1, 2]}"#).is_err());
        assert!(data_model_from_json(r#"{"a": {"b": 1}}"#).is_err());
        assert!(data_model_from_json("[]").is_err());
    }

    #[test]
    fn test_try_from_json_value() {
        let v = CmiValue::try_from(serde_json::json!(42)).unwrap();
        assert_eq!(v, CmiValue::Integer(42));

        let v = CmiValue::try_from(serde_json::json!(1.5)).unwrap();
        assert_eq!(v, CmiValue::Number(1.5));

        let err = CmiValue::try_from(serde_json::json!([1])).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidValue(_)));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(CmiValue::from(None::<String>), CmiValue::Null);
        assert_eq!(CmiValue::from(Some("x")), CmiValue::from("x"));
    }

    #[test]
    fn test_serialize_untagged() {
        let json = serde_json::to_string(&CmiValue::from("x")).unwrap();
        assert_eq!(json, r#""x""#);
        let json = serde_json::to_string(&CmiValue::Null).unwrap();
        assert_eq!(json, "null");
    }
}
