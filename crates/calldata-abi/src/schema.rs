//! JSON interface description → codec tree

use crate::codec::{Codec, TupleCodec, TupleField};
use crate::error::AbiError;
use serde::{Deserialize, Serialize};

/// One parameter of a JSON ABI entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataItem {
    /// Parameter name, possibly empty
    #[serde(default)]
    pub name: String,
    /// Solidity type string (`uint256`, `tuple[2]`, ...)
    #[serde(rename = "type")]
    pub ty: String,
    /// Members of a `tuple` type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<DataItem>>,
}

impl DataItem {
    /// Parameter of a non-tuple type
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            components: None,
        }
    }

    /// Parameter of a `tuple` (or tuple array) type
    pub fn tuple(name: impl Into<String>, ty: impl Into<String>, components: Vec<DataItem>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            components: Some(components),
        }
    }

    /// Build the codec for this parameter
    pub fn to_codec(&self) -> Result<Codec, AbiError> {
        build(&self.ty, self.components.as_deref(), &self.name)
    }
}

/// One `"type": "function"` entry of a JSON ABI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodAbi {
    /// Entry kind; absent means `function`
    #[serde(rename = "type", default = "function_kind")]
    pub kind: String,
    /// Function name
    #[serde(default)]
    pub name: String,
    /// Call parameters
    #[serde(default)]
    pub inputs: Vec<DataItem>,
    /// Return values
    #[serde(default)]
    pub outputs: Vec<DataItem>,
}

fn function_kind() -> String {
    "function".to_string()
}

/// Parse a type string. `components` is required for tuple types.
///
/// Trailing `[]`/`[N]` suffixes nest outward: `bytes4[3][2]` is a
/// two-element array of `bytes4[3]`.
pub fn parse_type(ty: &str, components: Option<&[DataItem]>) -> Result<Codec, AbiError> {
    build(ty, components, "")
}

fn build(ty: &str, components: Option<&[DataItem]>, name: &str) -> Result<Codec, AbiError> {
    let ty = ty.trim();
    if let Some(stripped) = ty.strip_suffix(']') {
        let open = stripped
            .rfind('[')
            .ok_or_else(|| AbiError::InvalidType(ty.to_string()))?;
        let element = build(&stripped[..open], components, name)?;
        let len = &stripped[open + 1..];
        if len.is_empty() {
            return Ok(Codec::dynamic_array(element));
        }
        let len = len
            .parse::<usize>()
            .map_err(|_| AbiError::InvalidType(ty.to_string()))?;
        return Codec::fixed_array(element, len);
    }

    match ty {
        "address" => Ok(Codec::Address),
        "bool" => Ok(Codec::Bool),
        "string" => Ok(Codec::String),
        "bytes" => Ok(Codec::Bytes),
        "byte" => Ok(Codec::FixedBytes(1)),
        "uint" => Ok(Codec::UInt(256)),
        "int" => Ok(Codec::Int(256)),
        "tuple" => {
            let components = components
                .ok_or_else(|| AbiError::InvalidType("tuple without components".to_string()))?;
            Ok(Codec::Tuple(tuple_from_items(name, components)?))
        }
        _ => {
            if let Some(bits) = ty.strip_prefix("uint") {
                Codec::uint(parse_width(ty, bits)?)
            } else if let Some(bits) = ty.strip_prefix("int") {
                Codec::int(parse_width(ty, bits)?)
            } else if let Some(len) = ty.strip_prefix("bytes") {
                let len = parse_width(ty, len)?;
                Codec::fixed_bytes(u8::try_from(len).map_err(|_| AbiError::InvalidType(ty.to_string()))?)
            } else {
                Err(AbiError::InvalidType(ty.to_string()))
            }
        }
    }
}

fn parse_width(ty: &str, digits: &str) -> Result<u16, AbiError> {
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AbiError::InvalidType(ty.to_string()));
    }
    digits
        .parse::<u16>()
        .map_err(|_| AbiError::InvalidType(ty.to_string()))
}

/// Tuple codec over a parameter list
pub fn tuple_from_items(name: &str, items: &[DataItem]) -> Result<TupleCodec, AbiError> {
    let fields = items
        .iter()
        .map(|item| Ok(TupleField::new(item.name.clone(), item.to_codec()?)))
        .collect::<Result<Vec<_>, AbiError>>()?;
    Ok(TupleCodec::new(fields)?.with_name(name))
}

/// Parse a JSON ABI: either a single function object or a contract ABI
/// array. Entries other than functions (events, errors, constructors) are
/// skipped.
pub fn parse_abi(json: &str) -> Result<Vec<MethodAbi>, AbiError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let entries = match value {
        serde_json::Value::Array(entries) => entries,
        object @ serde_json::Value::Object(_) => vec![object],
        _ => {
            return Err(AbiError::Json(
                "expected a function object or an ABI array".to_string(),
            ))
        }
    };

    let mut methods = Vec::new();
    for entry in entries {
        let method: MethodAbi = serde_json::from_value(entry)?;
        if method.kind == "function" {
            methods.push(method);
        }
    }
    Ok(methods)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ArrayLength;

    #[test]
    fn test_parse_elementary() {
        assert_eq!(parse_type("address", None).unwrap(), Codec::Address);
        assert_eq!(parse_type("uint256", None).unwrap(), Codec::UInt(256));
        assert_eq!(parse_type("int32", None).unwrap(), Codec::Int(32));
        assert_eq!(parse_type("bytes32", None).unwrap(), Codec::FixedBytes(32));
        assert_eq!(parse_type("bytes", None).unwrap(), Codec::Bytes);
    }

    #[test]
    fn test_parse_default_widths() {
        assert_eq!(parse_type("uint", None).unwrap(), Codec::UInt(256));
        assert_eq!(parse_type("int", None).unwrap(), Codec::Int(256));
        assert_eq!(parse_type("byte", None).unwrap(), Codec::FixedBytes(1));
    }

    #[test]
    fn test_parse_invalid() {
        for ty in ["uint7", "int0", "uint264", "bytes0", "bytes33", "uint08", "float", "string[", "bool[x]", "tuple"] {
            assert!(
                matches!(parse_type(ty, None), Err(AbiError::InvalidType(_))),
                "{} should be rejected",
                ty
            );
        }
    }

    #[test]
    fn test_parse_array_suffixes_nest_outward() {
        let codec = parse_type("bytes4[3][]", None).unwrap();
        let Codec::Array(outer) = codec else {
            panic!("expected array");
        };
        assert_eq!(outer.length(), ArrayLength::Dynamic);
        let Codec::Array(inner) = outer.element() else {
            panic!("expected nested array");
        };
        assert_eq!(inner.length(), ArrayLength::Fixed(3));
        assert_eq!(inner.element(), &Codec::FixedBytes(4));
    }

    #[test]
    fn test_parse_tuple_array() {
        let item = DataItem::tuple(
            "points",
            "tuple[]",
            vec![DataItem::new("x", "uint256"), DataItem::new("label", "string")],
        );
        let codec = item.to_codec().unwrap();
        assert_eq!(codec.canonical_type(), "(uint256,string)[]");
        assert_eq!(codec.type_name(), "tuple[]");
    }

    #[test]
    fn test_data_item_json() {
        let item: DataItem = serde_json::from_str(
            r#"{"name":"s","type":"tuple","components":[{"name":"a","type":"uint8"}]}"#,
        )
        .unwrap();
        assert_eq!(item.components.as_ref().map(Vec::len), Some(1));
        assert!(item.to_codec().unwrap().is_static());
    }

    #[test]
    fn test_parse_abi_object_and_array() {
        let single = parse_abi(
            r#"{"name":"f","type":"function","inputs":[{"name":"x","type":"uint256"}],"outputs":[]}"#,
        )
        .unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].inputs[0].ty, "uint256");

        let contract = parse_abi(
            r#"[
                {"type":"constructor","inputs":[]},
                {"type":"event","name":"E","inputs":[{"name":"a","type":"uint256","indexed":true}],"anonymous":false},
                {"type":"function","name":"g","inputs":[],"outputs":[{"name":"","type":"bool"}],"stateMutability":"view"},
                {"name":"h","inputs":[]}
            ]"#,
        )
        .unwrap();
        let names: Vec<&str> = contract.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["g", "h"]);
    }

    #[test]
    fn test_parse_abi_rejects_scalars() {
        assert!(matches!(parse_abi("42"), Err(AbiError::Json(_))));
        assert!(matches!(parse_abi("{not json"), Err(AbiError::Json(_))));
    }
}
