//! Per-call encoding and decoding options

use serde::{Deserialize, Serialize};

/// Options for `encode` calls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EncodeOptions {
    /// Share storage between identical dynamic tails
    pub optimize: bool,
}

impl EncodeOptions {
    /// Options with the optimizer enabled
    pub fn optimized() -> Self {
        Self { optimize: true }
    }
}

/// Options for `decode` calls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecodeOptions {
    /// Decode tuples as name → value maps instead of positional lists
    pub structs_as_objects: bool,
}

impl DecodeOptions {
    /// Options that decode tuples as maps
    pub fn structs_as_objects() -> Self {
        Self {
            structs_as_objects: true,
        }
    }

    /// Output shape threaded through every nested tuple decode
    pub fn tuple_shape(&self) -> TupleShape {
        if self.structs_as_objects {
            TupleShape::Named
        } else {
            TupleShape::Positional
        }
    }
}

/// Output shape of a decoded tuple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TupleShape {
    /// `Value::List` in declaration order
    Positional,
    /// `Value::Map` keyed by field name
    Named,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert!(!EncodeOptions::default().optimize);
        assert_eq!(DecodeOptions::default().tuple_shape(), TupleShape::Positional);
        assert_eq!(DecodeOptions::structs_as_objects().tuple_shape(), TupleShape::Named);
    }

    #[test]
    fn test_camel_case_json() {
        let options: DecodeOptions = serde_json::from_str(r#"{"structsAsObjects":true}"#).unwrap();
        assert!(options.structs_as_objects);

        let options: EncodeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, EncodeOptions::default());
        assert_eq!(
            serde_json::to_string(&EncodeOptions::optimized()).unwrap(),
            r#"{"optimize":true}"#
        );
    }
}
