//! Generic value model shared by both conversion directions
//!
//! [`Value`] is the intermediate representation between the CBOR and JSON
//! codecs. It has one variant per data-model case so every pass matches
//! exhaustively instead of inspecting types at runtime.

use crate::error::{CliError, Result};
use ciborium::value::Integer as CborInteger;
use ciborium::Value as CborValue;

/// CBOR tag for an unsigned bignum
const TAG_BIGNUM_POS: u64 = 2;
/// CBOR tag for a negative bignum
const TAG_BIGNUM_NEG: u64 = 3;

/// A decoded document node
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer; `i128` spans the whole CBOR range -2^64 ..= 2^64-1
    Integer(i128),
    /// IEEE 754 double
    Float(f64),
    /// UTF-8 text string
    Text(String),
    /// Byte string, CBOR only
    Bytes(Vec<u8>),
    /// Ordered sequence
    Array(Vec<Self>),
    /// Map in decoder order; keys may be any value
    Map(Vec<(Self, Self)>),
    /// Bignum wider than 64 bits (tags 2 and 3): `magnitude` for a positive
    /// bignum, `-1 - magnitude` for a negative one
    BigInt {
        /// Tag 3 rather than tag 2
        negative: bool,
        /// Big-endian, without leading zero bytes
        magnitude: Vec<u8>,
    },
}

impl Value {
    /// Build from a decoded CBOR tree.
    ///
    /// Semantic tags are dropped in favour of their content. Bignums (tags 2
    /// and 3) that fit the CBOR integer range become [`Value::Integer`], wider
    /// ones [`Value::BigInt`].
    pub fn from_cbor(value: CborValue) -> Self {
        match value {
            CborValue::Null => Self::Null,
            CborValue::Bool(b) => Self::Bool(b),
            CborValue::Integer(i) => Self::Integer(i128::from(i)),
            CborValue::Float(f) => Self::Float(f),
            CborValue::Text(s) => Self::Text(s),
            CborValue::Bytes(b) => Self::Bytes(b),
            CborValue::Array(items) => Self::Array(items.into_iter().map(Self::from_cbor).collect()),
            CborValue::Map(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (Self::from_cbor(k), Self::from_cbor(v)))
                    .collect(),
            ),
            CborValue::Tag(tag, content) => match (tag, *content) {
                (TAG_BIGNUM_POS, CborValue::Bytes(bytes)) => Self::bignum(false, &bytes),
                (TAG_BIGNUM_NEG, CborValue::Bytes(bytes)) => Self::bignum(true, &bytes),
                (tag, content) => {
                    tracing::debug!(tag, "dropping CBOR tag");
                    Self::from_cbor(content)
                }
            },
            other => {
                tracing::warn!(?other, "unsupported CBOR value, writing null");
                Self::Null
            }
        }
    }

    /// Convert into a tree the CBOR encoder accepts.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Unrepresentable`] for an integer outside the CBOR
    /// integer range.
    pub fn into_cbor(self) -> Result<CborValue> {
        let value = match self {
            Self::Null => CborValue::Null,
            Self::Bool(b) => CborValue::Bool(b),
            Self::Integer(i) => CborValue::Integer(CborInteger::try_from(i).map_err(|_| {
                CliError::unrepresentable_cbor(format!("integer {i} is out of range"))
            })?),
            Self::Float(f) => CborValue::Float(f),
            Self::Text(s) => CborValue::Text(s),
            Self::Bytes(b) => CborValue::Bytes(b),
            Self::Array(items) => CborValue::Array(
                items
                    .into_iter()
                    .map(Self::into_cbor)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Self::Map(entries) => CborValue::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| Ok((k.into_cbor()?, v.into_cbor()?)))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Self::BigInt {
                negative,
                magnitude,
            } => {
                let tag = if negative {
                    TAG_BIGNUM_NEG
                } else {
                    TAG_BIGNUM_POS
                };
                CborValue::Tag(tag, Box::new(CborValue::Bytes(magnitude)))
            }
        };
        Ok(value)
    }

    fn bignum(negative: bool, bytes: &[u8]) -> Self {
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        let magnitude = &bytes[start..];
        if magnitude.len() > 8 {
            return Self::BigInt {
                negative,
                magnitude: magnitude.to_vec(),
            };
        }
        let n = i128::from(magnitude.iter().fold(0, |acc, &b| (acc << 8) | u64::from(b)));
        Self::Integer(if negative { -1 - n } else { n })
    }
}

/// Decimal text of a bignum
pub(crate) fn bignum_decimal(negative: bool, magnitude: &[u8]) -> String {
    let mut n = magnitude.to_vec();
    if negative {
        // -1 - m: the digits are those of m + 1
        let mut carry = true;
        for byte in n.iter_mut().rev() {
            if !carry {
                break;
            }
            let (sum, overflow) = byte.overflowing_add(1);
            *byte = sum;
            carry = overflow;
        }
        if carry {
            n.insert(0, 1);
        }
    }

    let mut digits = Vec::new();
    while n.iter().any(|&b| b != 0) {
        let mut rem = 0u32;
        for byte in &mut n {
            let cur = (rem << 8) | u32::from(*byte);
            *byte = u8::try_from(cur / 10).unwrap_or(u8::MAX);
            rem = cur % 10;
        }
        digits.push(char::from_digit(rem, 10).unwrap_or('0'));
    }
    if digits.is_empty() {
        digits.push('0');
    }
    if negative {
        digits.push('-');
    }
    digits.iter().rev().collect()
}
