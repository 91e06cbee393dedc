//! Fixed and dynamic length arrays

use super::Codec;
use crate::error::AbiError;
use crate::value::Value;

/// Declared array length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayLength {
    /// `T[N]`
    Fixed(usize),
    /// `T[]`, length stored as the first tail word
    Dynamic,
}

/// Homogeneous sequence of one element codec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayCodec {
    element: Box<Codec>,
    length: ArrayLength,
    static_words: Option<usize>,
}

impl ArrayCodec {
    /// Create an array codec. Fixed arrays must have at least one element.
    pub fn new(element: Codec, length: ArrayLength) -> Result<Self, AbiError> {
        let static_words = match length {
            ArrayLength::Fixed(0) => {
                return Err(AbiError::InvalidType(format!(
                    "{}[0]: fixed arrays need at least one element",
                    element.type_name()
                )))
            }
            ArrayLength::Fixed(n) => match element.static_words() {
                Some(words) => Some(words.checked_mul(n).ok_or_else(|| {
                    AbiError::InvalidType(format!("{}[{}] is too large", element.type_name(), n))
                })?),
                None => None,
            },
            ArrayLength::Dynamic => None,
        };
        Ok(Self {
            element: Box::new(element),
            length,
            static_words,
        })
    }

    /// Create a `T[]` codec
    pub fn dynamic(element: Codec) -> Self {
        Self {
            element: Box::new(element),
            length: ArrayLength::Dynamic,
            static_words: None,
        }
    }

    /// Element codec
    pub fn element(&self) -> &Codec {
        &self.element
    }

    /// Declared length
    pub fn length(&self) -> ArrayLength {
        self.length
    }

    pub(crate) fn static_words(&self) -> Option<usize> {
        self.static_words
    }

    pub(crate) fn suffix(&self) -> String {
        match self.length {
            ArrayLength::Fixed(n) => format!("[{}]", n),
            ArrayLength::Dynamic => "[]".to_string(),
        }
    }

    /// Check `value` against the declared length and return its elements
    pub(crate) fn bind<'v>(&self, value: &'v Value) -> Result<&'v [Value], AbiError> {
        let items = match value {
            Value::List(items) => items.as_slice(),
            other => {
                return Err(AbiError::TypeMismatch {
                    expected: format!("list for {}{}", self.element.type_name(), self.suffix()),
                    found: other.kind().to_string(),
                })
            }
        };
        if let ArrayLength::Fixed(n) = self.length {
            if items.len() != n {
                return Err(AbiError::ArrayLength {
                    expected: n,
                    actual: items.len(),
                });
            }
        }
        Ok(items)
    }
}
