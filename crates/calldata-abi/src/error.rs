//! ABI codec error types

use calldata_primitives::PrimitiveError;
use thiserror::Error;

/// ABI codec error type
#[derive(Debug, Error)]
pub enum AbiError {
    /// Integer does not fit the declared width
    #[error("Tried to assign {value} to {ty}, which is out of range")]
    IntegerOutOfRange {
        /// Offending value in decimal
        value: String,
        /// Declared type
        ty: String,
    },

    /// Hex value without the `0x` prefix
    #[error("Tried to encode non-hex value. Value must include '0x' prefix. Got '{value}'")]
    MissingHexPrefix {
        /// Offending input
        value: String,
    },

    /// Hex value with an odd number of nibbles
    #[error("Tried to assign {value}, which contains a half-byte. Use full bytes only.")]
    HalfByte {
        /// Offending input
        value: String,
    },

    /// Hex value with non-hex digits
    #[error("Invalid hex value '{value}': {reason}")]
    InvalidHex {
        /// Offending input
        value: String,
        /// Decoder message
        reason: String,
    },

    /// Too many bytes for a `bytesN`
    #[error("Tried to assign {value} ({len} bytes), which exceeds max bytes that can be stored in a {ty}")]
    FixedBytesOverflow {
        /// Offending input
        value: String,
        /// Byte length of the input
        len: usize,
        /// Declared type
        ty: String,
    },

    /// Address input that is not exactly 20 bytes
    #[error("Invalid address '{value}': address must be 20 bytes, got {len}")]
    AddressLength {
        /// Offending input
        value: String,
        /// Byte length of the input
        len: usize,
    },

    /// Decoded string bytes are not UTF-8
    #[error("Invalid UTF-8 in string: {0}")]
    InvalidUtf8(String),

    /// Fixed array received the wrong element count
    #[error("Expected array of {expected} elements, but got array of length {actual}")]
    ArrayLength {
        /// Declared length
        expected: usize,
        /// Supplied length
        actual: usize,
    },

    /// Named tuple input without some declared fields
    #[error("Could not assign tuple to object: missing keys {}", .names.join(", "))]
    MissingFields {
        /// Missing field names in declaration order
        names: Vec<String>,
    },

    /// Named tuple input with an undeclared field
    #[error("Could not assign tuple to object: unrecognized key '{name}' in object {tuple}")]
    UnknownField {
        /// Offending key
        name: String,
        /// Tuple name
        tuple: String,
    },

    /// Named tuple input that repeats a key
    #[error("Could not assign tuple to object: duplicate key '{name}' in object {tuple}")]
    DuplicateField {
        /// Repeated key
        name: String,
        /// Tuple name
        tuple: String,
    },

    /// Positional tuple input with the wrong element count
    #[error("Expected tuple of {expected} fields, but got {actual} values")]
    TupleArity {
        /// Declared field count
        expected: usize,
        /// Supplied value count
        actual: usize,
    },

    /// Value kind not accepted by the codec
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Accepted input kinds
        expected: String,
        /// Supplied value kind
        found: String,
    },

    /// Offset or length word that does not point inside the buffer
    #[error("Offset {offset} is out of bounds for calldata of {len} bytes")]
    OffsetOutOfBounds {
        /// Offending offset (decimal)
        offset: String,
        /// Buffer length
        len: usize,
    },

    /// Buffer ends before a read completes
    #[error("Insufficient data: need {needed} bytes, have {available}")]
    Truncated {
        /// Bytes required
        needed: usize,
        /// Bytes present
        available: usize,
    },

    /// Buffer length is not a whole number of words
    #[error("Calldata length {len} is not a multiple of 32 bytes")]
    Misaligned {
        /// Buffer length
        len: usize,
    },

    /// Calldata prefix does not match the method selector
    #[error("Selector mismatch: expected {expected}, found {found}")]
    SelectorMismatch {
        /// Method selector
        expected: String,
        /// Calldata prefix
        found: String,
    },

    /// Offset slot whose target block was never laid out
    #[error("Unresolved pointer to block {0}")]
    UnresolvedPointer(usize),

    /// Unsupported or malformed type string
    #[error("Invalid type: {0}")]
    InvalidType(String),

    /// Function name not found, or ambiguous without a name
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Malformed JSON input
    #[error("JSON error: {0}")]
    Json(String),

    /// Primitive conversion error
    #[error(transparent)]
    Primitive(#[from] PrimitiveError),
}

impl From<serde_json::Error> for AbiError {
    fn from(e: serde_json::Error) -> Self {
        AbiError::Json(e.to_string())
    }
}
