//! Tuples: ordered, named fields

use super::Codec;
use crate::error::AbiError;
use crate::options::TupleShape;
use crate::value::Value;
use std::collections::HashSet;

/// One tuple member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleField {
    /// Field name; unnamed fields are called `field_<position>`
    pub name: String,
    /// Field codec
    pub codec: Codec,
}

impl TupleField {
    /// Create a field
    pub fn new(name: impl Into<String>, codec: Codec) -> Self {
        Self {
            name: name.into(),
            codec,
        }
    }
}

/// Ordered list of named fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleCodec {
    name: Option<String>,
    fields: Vec<TupleField>,
    static_words: Option<usize>,
}

impl TupleCodec {
    /// Create a tuple codec.
    ///
    /// Empty names are replaced by `field_1`, `field_2`, ... and duplicate
    /// names are rejected.
    pub fn new(mut fields: Vec<TupleField>) -> Result<Self, AbiError> {
        for (i, field) in fields.iter_mut().enumerate() {
            if field.name.is_empty() {
                field.name = format!("field_{}", i + 1);
            }
        }

        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(AbiError::InvalidType(format!(
                    "duplicate tuple field '{}'",
                    field.name
                )));
            }
        }

        let static_words = fields
            .iter()
            .try_fold(0usize, |acc, f| acc.checked_add(f.codec.static_words()?));
        Ok(Self {
            name: None,
            fields,
            static_words,
        })
    }

    /// Attach the name reported in binding errors
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.is_empty() { None } else { Some(name) };
        self
    }

    /// Name reported in binding errors
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("tuple")
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[TupleField] {
        &self.fields
    }

    /// Field codecs in declaration order
    pub fn codecs(&self) -> impl Iterator<Item = &Codec> + '_ {
        self.fields.iter().map(|f| &f.codec)
    }

    pub(crate) fn static_words(&self) -> Option<usize> {
        self.static_words
    }

    pub(crate) fn canonical_type(&self) -> String {
        let members: Vec<String> = self.codecs().map(Codec::canonical_type).collect();
        format!("({})", members.join(","))
    }

    /// Bind a positional list or a named map to the fields, in declaration order
    pub(crate) fn bind<'v>(&self, value: &'v Value) -> Result<Vec<&'v Value>, AbiError> {
        match value {
            Value::List(items) => {
                if items.len() != self.fields.len() {
                    return Err(AbiError::TupleArity {
                        expected: self.fields.len(),
                        actual: items.len(),
                    });
                }
                Ok(items.iter().collect())
            }
            Value::Map(entries) => {
                let mut keys = HashSet::new();
                for (key, _) in entries {
                    if !keys.insert(key.as_str()) {
                        return Err(AbiError::DuplicateField {
                            name: key.clone(),
                            tuple: self.name().to_string(),
                        });
                    }
                }
                if let Some((key, _)) = entries
                    .iter()
                    .find(|(key, _)| !self.fields.iter().any(|f| &f.name == key))
                {
                    return Err(AbiError::UnknownField {
                        name: key.clone(),
                        tuple: self.name().to_string(),
                    });
                }

                let mut bound = Vec::with_capacity(self.fields.len());
                let mut missing = Vec::new();
                for field in &self.fields {
                    match value.get(&field.name) {
                        Some(v) => bound.push(v),
                        None => missing.push(field.name.clone()),
                    }
                }
                if !missing.is_empty() {
                    return Err(AbiError::MissingFields { names: missing });
                }
                Ok(bound)
            }
            other => Err(AbiError::TypeMismatch {
                expected: format!("list or map for {}", self.canonical_type()),
                found: other.kind().to_string(),
            }),
        }
    }

    /// Shape decoded field values
    pub(crate) fn assemble(&self, values: Vec<Value>, shape: TupleShape) -> Value {
        match shape {
            TupleShape::Positional => Value::List(values),
            TupleShape::Named => Value::Map(
                self.fields
                    .iter()
                    .map(|f| f.name.clone())
                    .zip(values)
                    .collect(),
            ),
        }
    }
}
