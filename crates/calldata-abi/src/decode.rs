//! Calldata decoding
//!
//! Walks a codec tree against a byte buffer, following offsets. Every read
//! is bounds-checked and every array length is checked against the bytes
//! left before anything is allocated for it.

use crate::codec::{elementary, ArrayLength, Codec, TupleCodec};
use crate::error::AbiError;
use crate::options::TupleShape;
use crate::value::Value;
use calldata_primitives::{H256, WORD_SIZE};

/// Decode a buffer produced by `Codec::encode`
pub(crate) fn decode_root(codec: &Codec, data: &[u8], shape: TupleShape) -> Result<Value, AbiError> {
    if data.len() % WORD_SIZE != 0 {
        return Err(AbiError::Misaligned { len: data.len() });
    }
    Decoder { data, shape }.block(codec, 0)
}

struct Decoder<'a> {
    data: &'a [u8],
    shape: TupleShape,
}

impl Decoder<'_> {
    fn word(&self, at: usize) -> Result<H256, AbiError> {
        let end = at.checked_add(WORD_SIZE).ok_or(AbiError::Truncated {
            needed: usize::MAX,
            available: self.data.len(),
        })?;
        let bytes = self.data.get(at..end).ok_or(AbiError::Truncated {
            needed: end,
            available: self.data.len(),
        })?;
        Ok(H256::from_slice(bytes).map_err(calldata_primitives::PrimitiveError::from)?)
    }

    /// Read an offset or length word that must index into the buffer
    fn index(&self, at: usize) -> Result<usize, AbiError> {
        let value = self.word(at)?.to_u256();
        let out_of_bounds = || AbiError::OffsetOutOfBounds {
            offset: value.to_string(),
            len: self.data.len(),
        };
        if value.bits() > 64 {
            return Err(out_of_bounds());
        }
        let index = usize::try_from(value.low_u64()).map_err(|_| out_of_bounds())?;
        if index > self.data.len() {
            return Err(out_of_bounds());
        }
        Ok(index)
    }

    /// Decode the block a value occupies when it is referenced by an
    /// offset (or is the root) starting at `start`.
    fn block(&self, codec: &Codec, start: usize) -> Result<Value, AbiError> {
        if codec.is_static() {
            return self.inline(codec, start);
        }
        match codec {
            Codec::Bytes | Codec::String => {
                let len = self.index(start)?;
                let from = start + WORD_SIZE;
                let payload = from
                    .checked_add(len)
                    .and_then(|to| self.data.get(from..to))
                    .ok_or(AbiError::Truncated {
                        needed: from.saturating_add(len),
                        available: self.data.len(),
                    })?;
                elementary::decode_payload(codec, payload)
            }
            Codec::Array(array) => {
                let (count, region) = match array.length() {
                    ArrayLength::Fixed(n) => (n, start),
                    ArrayLength::Dynamic => (self.index(start)?, start + WORD_SIZE),
                };
                let items = self.array(array.element(), count, region)?;
                Ok(Value::List(items))
            }
            Codec::Tuple(tuple) => {
                let values = self.tuple(tuple, start)?;
                Ok(tuple.assemble(values, self.shape))
            }
            other => Err(AbiError::InvalidType(format!(
                "{} has no tail",
                other.type_name()
            ))),
        }
    }

    fn array(&self, element: &Codec, count: usize, region: usize) -> Result<Vec<Value>, AbiError> {
        let head = count.saturating_mul(element.head_len().max(1));
        self.sequence(std::iter::repeat(element).take(count), count, head, region)
    }

    fn tuple(&self, tuple: &TupleCodec, region: usize) -> Result<Vec<Value>, AbiError> {
        let head = tuple
            .codecs()
            .fold(0usize, |acc, codec| acc.saturating_add(codec.head_len()));
        self.sequence(tuple.codecs(), tuple.fields().len(), head, region)
    }

    /// Decode `count` consecutive heads, `head` bytes in total, starting
    /// at `region`; offsets in them are relative to `region`.
    fn sequence<'c>(
        &self,
        codecs: impl Iterator<Item = &'c Codec>,
        count: usize,
        head: usize,
        region: usize,
    ) -> Result<Vec<Value>, AbiError> {
        let available = self.data.len().saturating_sub(region);
        if head > available {
            return Err(AbiError::Truncated {
                needed: region.saturating_add(head),
                available: self.data.len(),
            });
        }

        let mut values = Vec::with_capacity(count);
        let mut cursor = region;
        for codec in codecs {
            let value = if codec.is_static() {
                self.inline(codec, cursor)?
            } else {
                let offset = self.index(cursor)?;
                let start = region.checked_add(offset).ok_or_else(|| AbiError::OffsetOutOfBounds {
                    offset: offset.to_string(),
                    len: self.data.len(),
                })?;
                self.block(codec, start)?
            };
            values.push(value);
            cursor += codec.head_len();
        }
        Ok(values)
    }

    /// Decode a static value laid out inline at `at`
    fn inline(&self, codec: &Codec, at: usize) -> Result<Value, AbiError> {
        match codec {
            Codec::Array(array) => {
                let count = match array.length() {
                    ArrayLength::Fixed(n) => n,
                    ArrayLength::Dynamic => 0,
                };
                let items = self.array(array.element(), count, at)?;
                Ok(Value::List(items))
            }
            Codec::Tuple(tuple) => {
                let values = self.tuple(tuple, at)?;
                Ok(tuple.assemble(values, self.shape))
            }
            _ => elementary::decode_word(codec, &self.word(at)?),
        }
    }
}
