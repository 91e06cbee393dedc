//! Runtime argument values
//!
//! A `Value` mirrors the shape of a codec tree: scalars at the leaves,
//! `List` for arrays and positional tuples, `Map` for named tuples.

use crate::error::AbiError;
use calldata_primitives::{Address, Integer, U256};
use serde_json::{Map as JsonMap, Number, Value as Json};

/// Argument or decoded value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Boolean
    Bool(bool),
    /// Signed or unsigned integer
    Int(Integer),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Text, or a `0x` hex literal for address and byte types
    String(String),
    /// Array elements or positional tuple fields
    List(Vec<Value>),
    /// Named tuple fields, in insertion order
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Short name of the variant, used in type-mismatch errors
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Bytes(_) => "bytes",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Build a named tuple value
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Look up a named field
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.iter().find(|(k, _)| k == name).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Elements of a `List`
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Text of a `String`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer of an `Int`
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }

    /// Convert from JSON.
    ///
    /// Numbers must be integral; big integers are passed as decimal or hex
    /// strings and are parsed by the integer codecs.
    pub fn from_json(json: &Json) -> Result<Self, AbiError> {
        Ok(match json {
            Json::Null => return Err(AbiError::Json("null is not a valid argument".to_string())),
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => Value::Int(number_to_integer(n)?),
            Json::String(s) => Value::String(s.clone()),
            Json::Array(items) => Value::List(
                items
                    .iter()
                    .map(Value::from_json)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Json::Object(entries) => Value::Map(
                entries
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), Value::from_json(v)?)))
                    .collect::<Result<Vec<_>, AbiError>>()?,
            ),
        })
    }

    /// Convert to JSON.
    ///
    /// Integers outside the `i64`/`u64` range become decimal strings.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(i) => {
                if let Some(n) = i.to_i64() {
                    Json::from(n)
                } else if let Some(n) = i.to_u64() {
                    Json::from(n)
                } else {
                    Json::String(i.to_string())
                }
            }
            Value::Bytes(b) => Json::String(format!("0x{}", hex::encode(b))),
            Value::String(s) => Json::String(s.clone()),
            Value::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(entries) => {
                let mut object = JsonMap::new();
                for (k, v) in entries {
                    object.insert(k.clone(), v.to_json());
                }
                Json::Object(object)
            }
        }
    }
}

fn number_to_integer(n: &Number) -> Result<Integer, AbiError> {
    if let Some(v) = n.as_u64() {
        Ok(Integer::from(v))
    } else if let Some(v) = n.as_i64() {
        Ok(Integer::from(v))
    } else {
        Err(AbiError::Json(format!(
            "number {} is not an integer; pass large values as strings",
            n
        )))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Integer> for Value {
    fn from(i: Integer) -> Self {
        Value::Int(i)
    }
}

impl From<U256> for Value {
    fn from(v: U256) -> Self {
        Value::Int(Integer::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(Integer::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Int(Integer::from(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(Integer::from(v))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<Address> for Value {
    fn from(a: Address) -> Self {
        Value::String(a.to_hex())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_nested() {
        let json = json!({"a": [1, -2, "0x10"], "b": {"c": true}});
        let value = Value::from_json(&json).unwrap();
        assert_eq!(
            value,
            Value::map([
                (
                    "a",
                    Value::List(vec![Value::from(1i64), Value::from(-2i64), Value::from("0x10")])
                ),
                ("b", Value::map([("c", Value::Bool(true))])),
            ])
        );
    }

    #[test]
    fn test_from_json_rejects_null_and_floats() {
        assert!(matches!(Value::from_json(&Json::Null), Err(AbiError::Json(_))));
        assert!(matches!(Value::from_json(&json!(1.5)), Err(AbiError::Json(_))));
    }

    #[test]
    fn test_to_json_big_integer_is_string() {
        let value = Value::from(U256::MAX);
        assert_eq!(value.to_json(), Json::String(U256::MAX.to_string()));
        assert_eq!(Value::from(-7i64).to_json(), json!(-7));
        assert_eq!(Value::from(u64::MAX).to_json(), json!(u64::MAX));
    }

    #[test]
    fn test_to_json_preserves_map_order() {
        let value = Value::map([("z", Value::Bool(true)), ("a", Value::Bool(false))]);
        assert_eq!(value.to_json().to_string(), r#"{"z":true,"a":false}"#);
    }

    #[test]
    fn test_bytes_to_json_is_hex() {
        assert_eq!(Value::Bytes(vec![0xab, 0x01]).to_json(), json!("0xab01"));
    }

    #[test]
    fn test_accessors() {
        let value = Value::map([("name", Value::from("five"))]);
        assert_eq!(value.get("name").and_then(Value::as_str), Some("five"));
        assert!(value.get("missing").is_none());
        assert!(value.as_list().is_none());
        assert_eq!(Value::from(3i64).as_integer(), Some(&Integer::from(3)));
    }
}
