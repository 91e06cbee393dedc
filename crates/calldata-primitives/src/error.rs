//! Common error types for primitives

use crate::address::AddressError;
use crate::hash::HashError;
use crate::int::IntegerError;
use thiserror::Error;

/// Primitive operation error
#[derive(Debug, Error)]
pub enum PrimitiveError {
    /// Address error
    #[error("address error: {0}")]
    Address(#[from] AddressError),

    /// Word error
    #[error("word error: {0}")]
    Hash(#[from] HashError),

    /// Integer error
    #[error("integer error: {0}")]
    Integer(#[from] IntegerError),
}
