//! Method codec: selector + input tuple, and a separate output tuple

use crate::codec::{Codec, TupleCodec};
use crate::error::AbiError;
use crate::options::{DecodeOptions, EncodeOptions};
use crate::schema::{tuple_from_items, MethodAbi};
use crate::selector::Selector;
use crate::value::Value;
use bytes::Bytes;
use tracing::debug;

/// A contract function's call and return codecs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    name: String,
    selector: Selector,
    inputs: Codec,
    outputs: Codec,
}

impl Method {
    /// Create a method; the selector is derived from the canonical signature
    pub fn new(name: impl Into<String>, inputs: TupleCodec, outputs: TupleCodec) -> Self {
        let name = name.into();
        let signature = format!("{}{}", name, Codec::Tuple(inputs.clone()).canonical_type());
        Self::with_selector(name, Selector::from_signature(&signature), inputs, outputs)
    }

    /// Create a method with a precomputed selector
    pub fn with_selector(
        name: impl Into<String>,
        selector: Selector,
        inputs: TupleCodec,
        outputs: TupleCodec,
    ) -> Self {
        Self {
            name: name.into(),
            selector,
            inputs: Codec::Tuple(inputs),
            outputs: Codec::Tuple(outputs),
        }
    }

    /// Build from a JSON ABI function entry
    pub fn from_abi(abi: &MethodAbi) -> Result<Self, AbiError> {
        Ok(Self::new(
            abi.name.clone(),
            tuple_from_items(&abi.name, &abi.inputs)?,
            tuple_from_items(&abi.name, &abi.outputs)?,
        ))
    }

    /// Function name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 4-byte selector
    pub fn selector(&self) -> Selector {
        self.selector
    }

    /// Input tuple codec
    pub fn inputs(&self) -> &Codec {
        &self.inputs
    }

    /// Output tuple codec
    pub fn outputs(&self) -> &Codec {
        &self.outputs
    }

    /// Canonical signature, e.g. `transfer(address,uint256)`
    pub fn signature(&self) -> String {
        format!("{}{}", self.name, self.inputs.canonical_type())
    }

    /// Encode call arguments: selector followed by the input tuple
    pub fn encode(&self, args: &Value, options: &EncodeOptions) -> Result<Bytes, AbiError> {
        let body = self.inputs.encode(args, options)?;
        let mut calldata = Vec::with_capacity(Selector::LEN + body.len());
        calldata.extend_from_slice(self.selector.as_bytes());
        calldata.extend_from_slice(&body);
        debug!(
            "Encoded {} call: {} bytes (optimize: {})",
            self.name,
            calldata.len(),
            options.optimize
        );
        Ok(Bytes::from(calldata))
    }

    /// Decode call arguments after checking the selector
    pub fn decode(&self, calldata: &[u8], options: &DecodeOptions) -> Result<Value, AbiError> {
        if calldata.len() < Selector::LEN {
            return Err(AbiError::Truncated {
                needed: Selector::LEN,
                available: calldata.len(),
            });
        }
        let (prefix, body) = calldata.split_at(Selector::LEN);
        if prefix != self.selector.as_bytes() {
            return Err(AbiError::SelectorMismatch {
                expected: self.selector.to_hex(),
                found: format!("0x{}", hex::encode(prefix)),
            });
        }
        debug!("Decoding {} call: {} bytes", self.name, body.len());
        self.inputs.decode(body, options)
    }

    /// Encode return values (no selector)
    pub fn encode_return_values(&self, values: &Value, options: &EncodeOptions) -> Result<Bytes, AbiError> {
        let data = self.outputs.encode(values, options)?;
        debug!("Encoded {} return values: {} bytes", self.name, data.len());
        Ok(Bytes::from(data))
    }

    /// Decode return values (no selector)
    pub fn decode_return_values(&self, data: &[u8], options: &DecodeOptions) -> Result<Value, AbiError> {
        debug!("Decoding {} return values: {} bytes", self.name, data.len());
        self.outputs.decode(data, options)
    }
}
