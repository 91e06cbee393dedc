//! Codec tree
//!
//! A `Codec` is built once from a type description and then reused for any
//! number of encode/decode calls. Every node knows whether it is static and,
//! if so, how many head words it occupies.

mod array;
pub(crate) mod elementary;
mod tuple;

pub use array::{ArrayCodec, ArrayLength};
pub use tuple::{TupleCodec, TupleField};

use crate::decode;
use crate::error::AbiError;
use crate::layout;
use crate::optimizer;
use crate::options::{DecodeOptions, EncodeOptions};
use crate::value::Value;
use calldata_primitives::WORD_SIZE;
use std::fmt;

/// ABI type node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Codec {
    /// `address`
    Address,
    /// `bool`
    Bool,
    /// `intN`
    Int(u16),
    /// `uintN`
    UInt(u16),
    /// `bytesN`
    FixedBytes(u8),
    /// `bytes`
    Bytes,
    /// `string`
    String,
    /// `T[N]` or `T[]`
    Array(ArrayCodec),
    /// `tuple`
    Tuple(TupleCodec),
}

impl Codec {
    /// `intN`, N a multiple of 8 in 8..=256
    pub fn int(bits: u16) -> Result<Self, AbiError> {
        Codec::Int(bits).checked()
    }

    /// `uintN`, N a multiple of 8 in 8..=256
    pub fn uint(bits: u16) -> Result<Self, AbiError> {
        Codec::UInt(bits).checked()
    }

    /// `bytesN`, N in 1..=32
    pub fn fixed_bytes(len: u8) -> Result<Self, AbiError> {
        Codec::FixedBytes(len).checked()
    }

    fn checked(self) -> Result<Self, AbiError> {
        self.check_width()?;
        Ok(self)
    }

    /// Reject `intN`/`uintN`/`bytesN` nodes built with a width outside the ABI
    pub(crate) fn check_width(&self) -> Result<(), AbiError> {
        match self {
            Codec::Int(bits) => check_int_width("int", *bits),
            Codec::UInt(bits) => check_int_width("uint", *bits),
            Codec::FixedBytes(len) if !(1..=32).contains(len) => {
                Err(AbiError::InvalidType(format!("bytes{}", len)))
            }
            _ => Ok(()),
        }
    }

    /// `T[N]`
    pub fn fixed_array(element: Codec, len: usize) -> Result<Self, AbiError> {
        Ok(Codec::Array(ArrayCodec::new(element, ArrayLength::Fixed(len))?))
    }

    /// `T[]`
    pub fn dynamic_array(element: Codec) -> Self {
        Codec::Array(ArrayCodec::dynamic(element))
    }

    /// `tuple` with the given `(name, codec)` fields
    pub fn tuple<N: Into<String>>(
        fields: impl IntoIterator<Item = (N, Codec)>,
    ) -> Result<Self, AbiError> {
        Ok(Codec::Tuple(TupleCodec::new(
            fields
                .into_iter()
                .map(|(name, codec)| TupleField::new(name, codec))
                .collect(),
        )?))
    }

    /// Encoded width in words when the type is static
    pub fn static_words(&self) -> Option<usize> {
        match self {
            Codec::Address
            | Codec::Bool
            | Codec::Int(_)
            | Codec::UInt(_)
            | Codec::FixedBytes(_) => Some(1),
            Codec::Bytes | Codec::String => None,
            Codec::Array(array) => array.static_words(),
            Codec::Tuple(tuple) => tuple.static_words(),
        }
    }

    /// True iff neither this node nor any descendant is dynamic
    pub fn is_static(&self) -> bool {
        self.static_words().is_some()
    }

    /// Bytes this node occupies in its parent's head
    pub fn head_len(&self) -> usize {
        self.static_words().unwrap_or(1) * WORD_SIZE
    }

    /// Declared type as written in an ABI description (`tuple[]`, `uint256`)
    pub fn type_name(&self) -> String {
        match self {
            Codec::Tuple(_) => "tuple".to_string(),
            Codec::Array(array) => format!("{}{}", array.element().type_name(), array.suffix()),
            _ => self.canonical_type(),
        }
    }

    /// Canonical type used in signatures (`(uint256,string)[]`)
    pub fn canonical_type(&self) -> String {
        match self {
            Codec::Address => "address".to_string(),
            Codec::Bool => "bool".to_string(),
            Codec::Int(bits) => format!("int{}", bits),
            Codec::UInt(bits) => format!("uint{}", bits),
            Codec::FixedBytes(len) => format!("bytes{}", len),
            Codec::Bytes => "bytes".to_string(),
            Codec::String => "string".to_string(),
            Codec::Array(array) => {
                format!("{}{}", array.element().canonical_type(), array.suffix())
            }
            Codec::Tuple(tuple) => tuple.canonical_type(),
        }
    }

    /// Encode `value` with this codec as the root.
    ///
    /// Static codecs produce their head words; dynamic codecs produce their
    /// own tail laid out at offset 0.
    pub fn encode(&self, value: &Value, options: &EncodeOptions) -> Result<Vec<u8>, AbiError> {
        let mut graph = layout::build(self, value)?;
        if options.optimize {
            optimizer::optimize(&mut graph);
        }
        graph.to_bytes()
    }

    /// Inverse of [`Codec::encode`]
    pub fn decode(&self, data: &[u8], options: &DecodeOptions) -> Result<Value, AbiError> {
        decode::decode_root(self, data, options.tuple_shape())
    }
}

fn check_int_width(prefix: &str, bits: u16) -> Result<(), AbiError> {
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(AbiError::InvalidType(format!("{}{}", prefix, bits)));
    }
    Ok(())
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_type())
    }
}
