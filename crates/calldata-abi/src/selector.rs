//! Function selectors

use crate::codec::elementary::parse_hex;
use crate::error::AbiError;
use calldata_primitives::H256;
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

/// Compute Keccak-256 hash of the input data
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    H256::from_bytes(result.into())
}

/// 4-byte function identifier prefixed to method calldata
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selector([u8; 4]);

impl Selector {
    /// Size in bytes
    pub const LEN: usize = 4;

    /// Wrap a precomputed selector
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Selector(bytes)
    }

    /// First four bytes of `keccak256(signature)`, e.g. for `"transfer(address,uint256)"`
    pub fn from_signature(signature: &str) -> Self {
        let hash = keccak256(signature.as_bytes());
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&hash.as_bytes()[..4]);
        Selector(bytes)
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Convert to hex string with 0x prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Selector({})", self.to_hex())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Selector {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = parse_hex(s)?;
        let bytes: [u8; 4] = bytes.as_slice().try_into().map_err(|_| {
            AbiError::InvalidType(format!("selector must be 4 bytes, got {}", bytes.len()))
        })?;
        Ok(Selector(bytes))
    }
}

impl From<[u8; 4]> for Selector {
    fn from(bytes: [u8; 4]) -> Self {
        Selector(bytes)
    }
}
