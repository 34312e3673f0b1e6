//! CBOR to JSON value translation
//!
//! CBOR maps may be keyed by any value; JSON objects only by strings. Keys
//! that are already text are kept as-is. Every other key is rendered as its
//! own compact JSON text, so the integer key `1` becomes `"1"` and the byte
//! string key `h'0102'` becomes `"\"AQI=\""`.
//!
//! Map entries are processed in decoder order. When two distinct keys render
//! to the same string the later entry's value wins and the key keeps the
//! position of the first occurrence.

use crate::config::ByteStrings;
use crate::error::{CliError, Result};
use crate::value::{bignum_decimal, Value};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::{Map, Number, Value as JsonValue};

/// Convert a decoded CBOR tree into a tree the JSON encoder accepts.
///
/// # Errors
///
/// Returns [`CliError::Unrepresentable`] for a non-finite float, which JSON
/// cannot express, wherever it appears (including inside a key).
pub fn normalize(value: Value, byte_strings: ByteStrings) -> Result<JsonValue> {
    let json = match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(b),
        Value::Integer(i) => JsonValue::Number(integer(i)?),
        Value::BigInt {
            negative,
            magnitude,
        } => JsonValue::Number(exact(&bignum_decimal(negative, &magnitude))?),
        Value::Float(f) => JsonValue::Number(
            Number::from_f64(f)
                .ok_or_else(|| CliError::unrepresentable_json(format!("float {f} is not finite")))?,
        ),
        Value::Text(s) => JsonValue::String(s),
        Value::Bytes(b) => bytes(&b, byte_strings),
        Value::Array(items) => JsonValue::Array(
            items
                .into_iter()
                .map(|item| normalize(item, byte_strings))
                .collect::<Result<Vec<_>>>()?,
        ),
        Value::Map(entries) => {
            let mut object = Map::with_capacity(entries.len());
            for (key, value) in entries {
                let key = key_text(key, byte_strings)?;
                let value = normalize(value, byte_strings)?;
                if object.insert(key.clone(), value).is_some() {
                    tracing::debug!(%key, "duplicate object key, later entry wins");
                }
            }
            JsonValue::Object(object)
        }
    };
    Ok(json)
}

/// Object key for a CBOR map key
fn key_text(key: Value, byte_strings: ByteStrings) -> Result<String> {
    match key {
        Value::Text(s) => Ok(s),
        other => {
            let rendered = normalize(other, byte_strings)?;
            Ok(serde_json::to_string(&rendered)?)
        }
    }
}

fn integer(i: i128) -> Result<Number> {
    if let Ok(n) = i64::try_from(i) {
        return Ok(Number::from(n));
    }
    if let Ok(n) = u64::try_from(i) {
        return Ok(Number::from(n));
    }
    // Negative CBOR integers reach -2^64; exact text keeps them intact.
    exact(&i.to_string())
}

/// Number carrying its decimal text verbatim
fn exact(decimal: &str) -> Result<Number> {
    serde_json::from_str(decimal)
        .map_err(|e| CliError::unrepresentable_json(format!("integer {decimal}: {e}")))
}

fn bytes(b: &[u8], byte_strings: ByteStrings) -> JsonValue {
    match byte_strings {
        ByteStrings::Base64 => JsonValue::String(BASE64.encode(b)),
        ByteStrings::Array => {
            JsonValue::Array(b.iter().map(|&byte| JsonValue::from(byte)).collect())
        }
    }
}
