//! Elementary types: address, bool, intN/uintN, bytesN, bytes, string
//!
//! Static elementary values occupy one word. `bytes` and `string` only
//! provide their payload here; the layout engine turns it into a tail.

use super::Codec;
use crate::error::AbiError;
use crate::value::Value;
use calldata_primitives::{Address, AddressError, Integer, PrimitiveError, H256, U256};

/// Encode a static elementary value into its word
pub(crate) fn encode_word(codec: &Codec, value: &Value) -> Result<H256, AbiError> {
    codec.check_width()?;
    match codec {
        Codec::Address => Ok(address_input(value)?.to_word()),
        Codec::Bool => match value {
            Value::Bool(b) => Ok(H256::from_u256(U256::from(*b as u8))),
            other => Err(mismatch("bool", other)),
        },
        Codec::Int(bits) => {
            let int = integer_input(value)?;
            if !int.fits_signed(*bits) {
                return Err(out_of_range(&int, codec));
            }
            Ok(H256::from_u256(int.to_twos_complement()))
        }
        Codec::UInt(bits) => {
            let int = integer_input(value)?;
            if !int.fits_unsigned(*bits) {
                return Err(out_of_range(&int, codec));
            }
            Ok(H256::from_u256(int.to_twos_complement()))
        }
        Codec::FixedBytes(len) => {
            let bytes = bytes_input(value)?;
            if bytes.len() > *len as usize {
                return Err(AbiError::FixedBytesOverflow {
                    value: format!("0x{}", hex::encode(&bytes)),
                    len: bytes.len(),
                    ty: codec.type_name(),
                });
            }
            Ok(H256::left_aligned(&bytes).map_err(PrimitiveError::from)?)
        }
        other => Err(AbiError::InvalidType(format!(
            "{} is not a single-word type",
            other.type_name()
        ))),
    }
}

/// Decode a static elementary word
pub(crate) fn decode_word(codec: &Codec, word: &H256) -> Result<Value, AbiError> {
    codec.check_width()?;
    match codec {
        Codec::Address => Ok(Value::String(Address::from_word(word).to_hex())),
        Codec::Bool => Ok(Value::Bool(!word.is_zero())),
        Codec::Int(bits) => Ok(Value::Int(Integer::from_signed_word(word.to_u256(), *bits))),
        Codec::UInt(bits) => Ok(Value::Int(Integer::from_unsigned_word(word.to_u256(), *bits))),
        Codec::FixedBytes(len) => Ok(Value::String(format!(
            "0x{}",
            hex::encode(&word.as_bytes()[..*len as usize])
        ))),
        other => Err(AbiError::InvalidType(format!(
            "{} is not a single-word type",
            other.type_name()
        ))),
    }
}

/// Payload of a `bytes` or `string` value
pub(crate) fn payload_input(codec: &Codec, value: &Value) -> Result<Vec<u8>, AbiError> {
    match codec {
        Codec::String => match value {
            Value::String(s) => Ok(s.as_bytes().to_vec()),
            other => Err(mismatch("string", other)),
        },
        _ => bytes_input(value),
    }
}

/// Decode a `bytes` or `string` payload
pub(crate) fn decode_payload(codec: &Codec, payload: &[u8]) -> Result<Value, AbiError> {
    match codec {
        Codec::String => String::from_utf8(payload.to_vec())
            .map(Value::String)
            .map_err(|e| AbiError::InvalidUtf8(e.to_string())),
        _ => Ok(Value::String(format!("0x{}", hex::encode(payload)))),
    }
}

/// Parse a `0x`-prefixed hex string with whole bytes
pub fn parse_hex(s: &str) -> Result<Vec<u8>, AbiError> {
    let digits = s.strip_prefix("0x").ok_or_else(|| AbiError::MissingHexPrefix {
        value: s.to_string(),
    })?;
    if digits.len() % 2 != 0 {
        return Err(AbiError::HalfByte {
            value: s.to_string(),
        });
    }
    hex::decode(digits).map_err(|e| AbiError::InvalidHex {
        value: s.to_string(),
        reason: e.to_string(),
    })
}

fn bytes_input(value: &Value) -> Result<Vec<u8>, AbiError> {
    match value {
        Value::String(s) => parse_hex(s),
        Value::Bytes(b) => Ok(b.clone()),
        other => Err(mismatch("0x hex string or bytes", other)),
    }
}

fn address_input(value: &Value) -> Result<Address, AbiError> {
    match value {
        Value::String(s) => Address::from_hex(s).map_err(|e| match e {
            AddressError::MissingPrefix(_) => AbiError::MissingHexPrefix { value: s.clone() },
            AddressError::InvalidHex(reason) => AbiError::InvalidHex {
                value: s.clone(),
                reason,
            },
            AddressError::InvalidLength(len) => AbiError::AddressLength {
                value: s.clone(),
                len,
            },
        }),
        Value::Bytes(b) => Address::from_slice(b).map_err(|_| AbiError::AddressLength {
            value: format!("0x{}", hex::encode(b)),
            len: b.len(),
        }),
        other => Err(mismatch("0x address string", other)),
    }
}

fn integer_input(value: &Value) -> Result<Integer, AbiError> {
    match value {
        Value::Int(int) => Ok(*int),
        Value::String(s) => Ok(s.parse::<Integer>().map_err(PrimitiveError::from)?),
        other => Err(mismatch("integer or numeric string", other)),
    }
}

fn out_of_range(int: &Integer, codec: &Codec) -> AbiError {
    AbiError::IntegerOutOfRange {
        value: int.to_string(),
        ty: codec.type_name(),
    }
}

fn mismatch(expected: &str, found: &Value) -> AbiError {
    AbiError::TypeMismatch {
        expected: expected.to_string(),
        found: found.kind().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_hex(codec: &Codec, value: Value) -> String {
        encode_word(codec, &value).unwrap().to_hex()
    }

    // ==================== Address ====================

    #[test]
    fn test_encode_address() {
        let value = Value::from("0xe41d2489571d322189246dafa5ebde1f4699f498");
        assert_eq!(
            word_hex(&Codec::Address, value.clone()),
            "0x000000000000000000000000e41d2489571d322189246dafa5ebde1f4699f498"
        );
        let word = encode_word(&Codec::Address, &value).unwrap();
        assert_eq!(decode_word(&Codec::Address, &word).unwrap(), value);
    }

    #[test]
    fn test_encode_address_errors() {
        assert!(matches!(
            encode_word(&Codec::Address, &Value::from("e4")),
            Err(AbiError::MissingHexPrefix { .. })
        ));
        assert!(matches!(
            encode_word(&Codec::Address, &Value::from("0xe4")),
            Err(AbiError::AddressLength { len: 1, .. })
        ));
    }

    #[test]
    fn test_decode_address_is_lowercase() {
        let word = Address::from_bytes([0xAB; 20]).to_word();
        assert_eq!(
            decode_word(&Codec::Address, &word).unwrap(),
            Value::String(format!("0x{}", "ab".repeat(20)))
        );
    }

    // ==================== Bool ====================

    #[test]
    fn test_encode_bool() {
        assert_eq!(encode_word(&Codec::Bool, &Value::Bool(true)).unwrap().as_bytes()[31], 1);
        assert!(encode_word(&Codec::Bool, &Value::Bool(false)).unwrap().is_zero());
        assert!(encode_word(&Codec::Bool, &Value::from(1i64)).is_err());
    }

    #[test]
    fn test_decode_bool_nonzero_is_true() {
        let word = H256::from_usize(2);
        assert_eq!(decode_word(&Codec::Bool, &word).unwrap(), Value::Bool(true));
    }

    // ==================== Integers ====================

    #[test]
    fn test_encode_int_negative() {
        assert_eq!(
            word_hex(&Codec::Int(32), Value::from(-5i64)),
            "0xfffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffb"
        );
    }

    #[test]
    fn test_int256_bounds() {
        let max = Integer::from((U256::one() << 255) - 1);
        let min = Integer::negative(U256::one() << 255);
        assert!(encode_word(&Codec::Int(256), &Value::Int(max)).is_ok());
        assert!(encode_word(&Codec::Int(256), &Value::Int(min)).is_ok());

        let over = Integer::from(U256::one() << 255);
        let under = Integer::negative((U256::one() << 255) + 1);
        assert!(matches!(
            encode_word(&Codec::Int(256), &Value::Int(over)),
            Err(AbiError::IntegerOutOfRange { .. })
        ));
        assert!(encode_word(&Codec::Int(256), &Value::Int(under)).is_err());
    }

    #[test]
    fn test_uint32_bounds() {
        let codec = Codec::UInt(32);
        assert!(encode_word(&codec, &Value::from(0i64)).is_ok());
        assert!(encode_word(&codec, &Value::from(u32::MAX as u64)).is_ok());
        assert!(encode_word(&codec, &Value::from(-1i64)).is_err());
        let err = encode_word(&codec, &Value::from(1u64 << 32)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Tried to assign 4294967296 to uint32, which is out of range"
        );
    }

    #[test]
    fn test_integer_from_string() {
        assert_eq!(
            encode_word(&Codec::UInt(256), &Value::from("0x6792a")).unwrap(),
            H256::from_usize(0x6792a)
        );
        assert_eq!(
            encode_word(&Codec::UInt(256), &Value::from("424234")).unwrap(),
            H256::from_usize(424234)
        );
        assert!(matches!(
            encode_word(&Codec::UInt(256), &Value::from("abc")),
            Err(AbiError::Primitive(_))
        ));
    }

    #[test]
    fn test_decode_int_sign_extension() {
        let word = H256::from_u256(Integer::from(-1).to_twos_complement());
        assert_eq!(decode_word(&Codec::Int(8), &word).unwrap(), Value::from(-1i64));
        assert_eq!(decode_word(&Codec::UInt(8), &word).unwrap(), Value::from(255u64));
    }

    #[test]
    fn test_out_of_range_widths_rejected() {
        let word = H256::from_bytes([0xff; 32]);
        let codecs = [
            Codec::Int(300),
            Codec::UInt(0),
            Codec::Int(12),
            Codec::FixedBytes(40),
            Codec::FixedBytes(0),
        ];
        for codec in codecs {
            assert!(matches!(decode_word(&codec, &word), Err(AbiError::InvalidType(_))));
            assert!(matches!(
                encode_word(&codec, &Value::from(1u64)),
                Err(AbiError::InvalidType(_))
            ));
        }
        assert!(matches!(
            Codec::FixedBytes(40).decode(&[0u8; 32], &crate::DecodeOptions::default()),
            Err(AbiError::InvalidType(_))
        ));
    }

    // ==================== Fixed bytes ====================

    #[test]
    fn test_encode_fixed_bytes_short_input() {
        let word = encode_word(&Codec::FixedBytes(4), &Value::from("0x1a18")).unwrap();
        assert_eq!(
            word.to_hex(),
            "0x1a18000000000000000000000000000000000000000000000000000000000000"
        );
        assert_eq!(
            decode_word(&Codec::FixedBytes(4), &word).unwrap(),
            Value::from("0x1a180000")
        );
    }

    #[test]
    fn test_encode_fixed_bytes_too_long() {
        let err = encode_word(&Codec::FixedBytes(4), &Value::from("0x0102030405")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Tried to assign 0x0102030405 (5 bytes), which exceeds max bytes that can be stored in a bytes4"
        );
    }

    #[test]
    fn test_encode_fixed_bytes_bad_hex() {
        let err = encode_word(&Codec::FixedBytes(4), &Value::from("01")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Tried to encode non-hex value. Value must include '0x' prefix. Got '01'"
        );
        let err = encode_word(&Codec::FixedBytes(4), &Value::from("0x010")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Tried to assign 0x010, which contains a half-byte. Use full bytes only."
        );
        assert!(matches!(
            encode_word(&Codec::FixedBytes(4), &Value::from("0xzz")),
            Err(AbiError::InvalidHex { .. })
        ));
    }

    // ==================== Payloads ====================

    #[test]
    fn test_string_payload_is_text() {
        let hex_like = format!("0x{}", "a".repeat(40));
        let payload = payload_input(&Codec::String, &Value::from(hex_like.as_str())).unwrap();
        assert_eq!(payload.len(), 42);
        assert_eq!(
            decode_payload(&Codec::String, &payload).unwrap(),
            Value::String(hex_like)
        );
    }

    #[test]
    fn test_bytes_payload_accepts_hex_or_raw() {
        assert_eq!(
            payload_input(&Codec::Bytes, &Value::from("0xabcd")).unwrap(),
            vec![0xab, 0xcd]
        );
        assert_eq!(
            payload_input(&Codec::Bytes, &Value::Bytes(vec![1, 2])).unwrap(),
            vec![1, 2]
        );
        assert_eq!(
            decode_payload(&Codec::Bytes, &[0xab, 0xcd]).unwrap(),
            Value::from("0xabcd")
        );
    }

    #[test]
    fn test_invalid_utf8_payload() {
        assert!(matches!(
            decode_payload(&Codec::String, &[0xff, 0xfe]),
            Err(AbiError::InvalidUtf8(_))
        ));
    }
}
