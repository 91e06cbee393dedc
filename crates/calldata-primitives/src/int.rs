//! Sign-magnitude integer spanning every `intN` and `uintN` value
//!
//! `Integer` covers `-(2^256 - 1) ..= 2^256 - 1`, which is wide enough for
//! both `int256` and `uint256`. Width checks and two's-complement
//! conversion against a declared bit width live here so the codec layer
//! only has to pick the width.

use primitive_types::U256;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Integer parsing error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntegerError {
    /// No digits after the sign or radix prefix
    #[error("empty integer literal: '{0}'")]
    Empty(String),
    /// Digits invalid for the radix, or magnitude above 2^256 - 1
    #[error("invalid integer literal: '{0}'")]
    Invalid(String),
}

/// Arbitrary sign with a 256-bit magnitude.
///
/// Zero is never negative.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Integer {
    negative: bool,
    magnitude: U256,
}

impl Integer {
    /// Zero
    pub const ZERO: Integer = Integer {
        negative: false,
        magnitude: U256([0; 4]),
    };

    /// Build from a sign and magnitude
    pub fn new(negative: bool, magnitude: U256) -> Self {
        Integer {
            negative: negative && !magnitude.is_zero(),
            magnitude,
        }
    }

    /// `-magnitude`
    pub fn negative(magnitude: U256) -> Self {
        Self::new(true, magnitude)
    }

    /// Whether the value is below zero
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Absolute value
    pub fn magnitude(&self) -> U256 {
        self.magnitude
    }

    /// Whether the value is representable as `uint<bits>`
    pub fn fits_unsigned(&self, bits: u16) -> bool {
        !self.negative && self.magnitude.bits() <= bits as usize
    }

    /// Whether the value is representable as `int<bits>`
    pub fn fits_signed(&self, bits: u16) -> bool {
        if bits == 0 || bits > 256 {
            return false;
        }
        if self.negative {
            self.magnitude <= U256::one() << (bits as usize - 1)
        } else {
            self.magnitude.bits() < bits as usize
        }
    }

    /// Two's-complement image across the full 256-bit word.
    ///
    /// Negative values are sign-extended, non-negative values zero-extended.
    pub fn to_twos_complement(&self) -> U256 {
        if self.negative {
            U256::zero().overflowing_sub(self.magnitude).0
        } else {
            self.magnitude
        }
    }

    /// Read the low `bits` of `word` as an unsigned integer
    pub fn from_unsigned_word(word: U256, bits: u16) -> Self {
        Self::new(false, word & low_mask(bits))
    }

    /// Read the low `bits` of `word` as a two's-complement signed integer
    pub fn from_signed_word(word: U256, bits: u16) -> Self {
        let bits = bits.min(256);
        let mask = low_mask(bits);
        let low = word & mask;
        if bits == 0 || !low.bit(bits as usize - 1) {
            return Self::new(false, low);
        }
        Self::negative(U256::zero().overflowing_sub(low).0 & mask)
    }

    /// Narrow to `i64` when in range
    pub fn to_i64(&self) -> Option<i64> {
        if self.magnitude.bits() > 64 {
            return None;
        }
        let magnitude = self.magnitude.low_u64();
        if self.negative {
            if magnitude <= i64::MAX as u64 {
                Some(-(magnitude as i64))
            } else if magnitude == i64::MAX as u64 + 1 {
                Some(i64::MIN)
            } else {
                None
            }
        } else {
            i64::try_from(magnitude).ok()
        }
    }

    /// Narrow to `u64` when in range
    pub fn to_u64(&self) -> Option<u64> {
        if self.negative || self.magnitude.bits() > 64 {
            None
        } else {
            Some(self.magnitude.low_u64())
        }
    }
}

fn low_mask(bits: u16) -> U256 {
    if bits >= 256 {
        U256::MAX
    } else {
        (U256::one() << bits as usize) - U256::one()
    }
}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.magnitude.cmp(&other.magnitude),
            (true, true) => other.magnitude.cmp(&self.magnitude),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        }
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.magnitude)
        } else {
            write!(f, "{}", self.magnitude)
        }
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self)
    }
}

impl FromStr for Integer {
    type Err = IntegerError;

    /// Accepts decimal or `0x` hex digits with an optional leading `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let magnitude = match unsigned.strip_prefix("0x") {
            Some(digits) if digits.is_empty() => return Err(IntegerError::Empty(s.to_string())),
            Some(digits) => U256::from_str_radix(digits, 16)
                .map_err(|_| IntegerError::Invalid(s.to_string()))?,
            None if unsigned.is_empty() => return Err(IntegerError::Empty(s.to_string())),
            None => {
                if !unsigned.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(IntegerError::Invalid(s.to_string()));
                }
                U256::from_dec_str(unsigned).map_err(|_| IntegerError::Invalid(s.to_string()))?
            }
        };
        Ok(Integer::new(negative, magnitude))
    }
}

impl From<U256> for Integer {
    fn from(value: U256) -> Self {
        Integer::new(false, value)
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Integer {
            fn from(value: $t) -> Self {
                Integer::new(false, U256::from(value))
            }
        })*
    };
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Integer {
            fn from(value: $t) -> Self {
                Integer::new(value < 0, U256::from(value.unsigned_abs()))
            }
        })*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_from_signed!(i8, i16, i32, i64, i128, isize);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pow2(n: usize) -> U256 {
        U256::one() << n
    }

    // ==================== Range checks ====================

    #[test]
    fn test_int256_bounds() {
        let max = Integer::from(pow2(255) - 1);
        let min = Integer::negative(pow2(255));
        assert!(max.fits_signed(256));
        assert!(min.fits_signed(256));
        assert!(!Integer::from(pow2(255)).fits_signed(256));
        assert!(!Integer::negative(pow2(255) + 1).fits_signed(256));
    }

    #[test]
    fn test_uint32_bounds() {
        assert!(Integer::from(0u32).fits_unsigned(32));
        assert!(Integer::from(u32::MAX).fits_unsigned(32));
        assert!(!Integer::from(-1i32).fits_unsigned(32));
        assert!(!Integer::from(u32::MAX as u64 + 1).fits_unsigned(32));
    }

    #[test]
    fn test_int8_bounds() {
        assert!(Integer::from(127).fits_signed(8));
        assert!(Integer::from(-128).fits_signed(8));
        assert!(!Integer::from(128).fits_signed(8));
        assert!(!Integer::from(-129).fits_signed(8));
    }

    #[test]
    fn test_uint256_max() {
        assert!(Integer::from(U256::MAX).fits_unsigned(256));
        assert!(!Integer::from(U256::MAX).fits_signed(256));
    }

    // ==================== Two's complement ====================

    #[test]
    fn test_negative_one_is_all_ones() {
        assert_eq!(Integer::from(-1).to_twos_complement(), U256::MAX);
    }

    #[test]
    fn test_negative_five_word() {
        let word = Integer::from(-5).to_twos_complement();
        assert_eq!(word, U256::MAX - 4);
        assert_eq!(Integer::from_signed_word(word, 32), Integer::from(-5));
    }

    #[test]
    fn test_signed_word_min() {
        let min = Integer::negative(pow2(255));
        let word = min.to_twos_complement();
        assert_eq!(word, pow2(255));
        assert_eq!(Integer::from_signed_word(word, 256), min);
    }

    #[test]
    fn test_unsigned_word_ignores_high_bits() {
        let word = U256::MAX;
        assert_eq!(Integer::from_unsigned_word(word, 8), Integer::from(255u8));
        assert_eq!(Integer::from_signed_word(word, 8), Integer::from(-1));
    }

    #[test]
    fn test_signed_word_wider_than_256_bits() {
        assert_eq!(Integer::from_signed_word(U256::MAX, 300), Integer::from(-1));
        assert_eq!(Integer::from_unsigned_word(U256::MAX, 300), Integer::from(U256::MAX));
    }

    #[test]
    fn test_zero_is_not_negative() {
        let zero = Integer::negative(U256::zero());
        assert!(!zero.is_negative());
        assert_eq!(zero, Integer::ZERO);
        assert_eq!(zero.to_string(), "0");
    }

    // ==================== Parsing and display ====================

    #[test]
    fn test_parse_decimal_and_hex() {
        assert_eq!("424234".parse::<Integer>().unwrap(), Integer::from(424234));
        assert_eq!("-15".parse::<Integer>().unwrap(), Integer::from(-15));
        assert_eq!("0x7f".parse::<Integer>().unwrap(), Integer::from(127));
        assert_eq!("-0x80".parse::<Integer>().unwrap(), Integer::from(-128));
    }

    #[test]
    fn test_parse_uint256_max() {
        let text = U256::MAX.to_string();
        let parsed: Integer = text.parse().unwrap();
        assert_eq!(parsed.magnitude(), U256::MAX);
        assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("".parse::<Integer>(), Err(IntegerError::Empty(_))));
        assert!(matches!("-".parse::<Integer>(), Err(IntegerError::Empty(_))));
        assert!(matches!("0x".parse::<Integer>(), Err(IntegerError::Empty(_))));
        assert!(matches!("12a".parse::<Integer>(), Err(IntegerError::Invalid(_))));
        assert!(matches!("+5".parse::<Integer>(), Err(IntegerError::Invalid(_))));
        let too_big = format!("{}0", U256::MAX);
        assert!(matches!(too_big.parse::<Integer>(), Err(IntegerError::Invalid(_))));
    }

    #[test]
    fn test_narrowing() {
        assert_eq!(Integer::from(i64::MIN).to_i64(), Some(i64::MIN));
        assert_eq!(Integer::from(i64::MAX).to_i64(), Some(i64::MAX));
        assert_eq!(Integer::from(u64::MAX).to_i64(), None);
        assert_eq!(Integer::from(u64::MAX).to_u64(), Some(u64::MAX));
        assert_eq!(Integer::from(-1).to_u64(), None);
    }

    #[test]
    fn test_ordering() {
        assert!(Integer::from(-2) < Integer::from(-1));
        assert!(Integer::from(-1) < Integer::ZERO);
        assert!(Integer::from(3) > Integer::from(2));
    }

    proptest! {
        #[test]
        fn signed_word_roundtrip(value: i128) {
            let int = Integer::from(value);
            prop_assert!(int.fits_signed(128));
            let word = int.to_twos_complement();
            prop_assert_eq!(Integer::from_signed_word(word, 128), int);
            prop_assert_eq!(Integer::from_signed_word(word, 256), int);
        }

        #[test]
        fn unsigned_word_roundtrip(value: u64) {
            let int = Integer::from(value);
            prop_assert!(int.fits_unsigned(64));
            prop_assert_eq!(Integer::from_unsigned_word(int.to_twos_complement(), 64), int);
        }
    }
}
