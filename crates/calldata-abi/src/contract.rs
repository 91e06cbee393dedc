//! Contract helper: the set of methods described by one JSON ABI

use bytes::Bytes;

use crate::error::AbiError;
use crate::method::Method;
use crate::options::{DecodeOptions, EncodeOptions};
use crate::schema::parse_abi;
use crate::value::Value;

/// Methods of a contract, looked up by name
#[derive(Debug, Clone, Default)]
pub struct Contract {
    methods: Vec<Method>,
}

impl Contract {
    /// Create an empty contract helper
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON ABI (a function object or an ABI array)
    pub fn from_json(json: &str) -> Result<Self, AbiError> {
        let methods = parse_abi(json)?
            .iter()
            .map(Method::from_abi)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { methods })
    }

    /// Add a method with builder pattern
    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    /// All methods in ABI order
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Get a method by name (the first overload wins)
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name() == name)
    }

    /// Pick a method by name, or the only method when no name is given
    pub fn resolve(&self, name: Option<&str>) -> Result<&Method, AbiError> {
        match name {
            Some(name) => self
                .method(name)
                .ok_or_else(|| AbiError::UnknownFunction(name.to_string())),
            None => match self.methods.as_slice() {
                [only] => Ok(only),
                [] => Err(AbiError::UnknownFunction("ABI has no functions".to_string())),
                _ => Err(AbiError::UnknownFunction(format!(
                    "ABI has {} functions; pick one by name",
                    self.methods.len()
                ))),
            },
        }
    }

    /// Encode a function call
    pub fn encode_call(
        &self,
        function_name: &str,
        args: &Value,
        options: &EncodeOptions,
    ) -> Result<Bytes, AbiError> {
        self.resolve(Some(function_name))?.encode(args, options)
    }

    /// Decode function output
    pub fn decode_output(
        &self,
        function_name: &str,
        data: &[u8],
        options: &DecodeOptions,
    ) -> Result<Value, AbiError> {
        self.resolve(Some(function_name))?
            .decode_return_values(data, options)
    }
}
