//! # calldata-primitives
//!
//! Primitive types for the calldata ABI codec.
//!
//! This crate provides the fixed-width building blocks the codec works in:
//! 32-byte words, 20-byte addresses and the signed/unsigned integer type
//! used for every `intN`/`uintN` value.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod error;
mod hash;
mod int;

pub use address::{Address, AddressError};
pub use error::PrimitiveError;
pub use hash::{Hash, HashError, H256};
pub use int::{Integer, IntegerError};

// Re-export primitive-types for U256
pub use primitive_types::U256;

/// Size of one ABI word in bytes
pub const WORD_SIZE: usize = 32;

/// Number of bytes needed to hold `len` bytes padded to whole words
pub fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD_SIZE) * WORD_SIZE
}
