//! Format detection and conversion
//!
//! The input is tried as CBOR first. A CBOR decode that succeeds and consumes
//! every byte decides the format, even when the same bytes would also parse as
//! JSON. Only then is JSON attempted. Output is built in memory in full, so a
//! failed conversion never leaves partial output behind.

use crate::coerce::coerce;
use crate::config::Options;
use crate::error::{CliError, Result};
use crate::json::Json;
use crate::normalize::normalize;
use crate::value::Value;
use ciborium::Value as CborValue;
use std::fmt;
use std::io::Cursor;
use std::str;

/// Encoding of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Concise Binary Object Representation (RFC 8949)
    Cbor,
    /// JSON text (RFC 8259)
    Json,
}

impl Format {
    /// The format a document of this format is converted to
    pub const fn opposite(self) -> Self {
        match self {
            Self::Cbor => Self::Json,
            Self::Json => Self::Cbor,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cbor => f.write_str("CBOR"),
            Self::Json => f.write_str("JSON"),
        }
    }
}

/// Result of one conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Detected input format
    pub input: Format,
    /// Encoded document in the opposite format
    pub output: Vec<u8>,
}

/// Detect the input format and convert to the other one.
///
/// # Errors
///
/// Returns [`CliError::InvalidInput`] when the input is neither CBOR nor JSON,
/// or an encoding error when the decoded value cannot be written in the
/// target format.
pub fn convert(input: &[u8], options: &Options) -> Result<Conversion> {
    if let Some(value) = decode_cbor(input) {
        tracing::debug!(bytes = input.len(), "input is CBOR");
        let output = cbor_to_json(value, options)?;
        return Ok(Conversion {
            input: Format::Cbor,
            output,
        });
    }

    if let Some(value) = decode_json(input) {
        tracing::debug!(bytes = input.len(), "input is JSON");
        let output = json_to_cbor(value)?;
        return Ok(Conversion {
            input: Format::Json,
            output,
        });
    }

    Err(CliError::InvalidInput)
}

/// Decode exactly one CBOR item spanning the whole input
pub fn decode_cbor(input: &[u8]) -> Option<Value> {
    let mut reader = Cursor::new(input);
    match ciborium::from_reader::<CborValue, _>(&mut reader) {
        Ok(value) => {
            if usize::try_from(reader.position()).is_ok_and(|n| n == input.len()) {
                Some(Value::from_cbor(value))
            } else {
                tracing::debug!(
                    consumed = reader.position(),
                    bytes = input.len(),
                    "trailing bytes after CBOR item"
                );
                None
            }
        }
        Err(e) => {
            tracing::debug!(error = ?e, "not CBOR");
            None
        }
    }
}

/// Decode one JSON document, keeping numbers as their literal text.
///
/// Only whitespace may follow the document; a second document is an error.
pub fn decode_json(input: &[u8]) -> Option<Json> {
    let text = str::from_utf8(input)
        .map_err(|e| tracing::debug!(error = %e, "not UTF-8, so not JSON"))
        .ok()?;
    Json::parse(text)
        .map_err(|e| tracing::debug!(error = %e, "not JSON"))
        .ok()
}

/// Encode a decoded CBOR tree as JSON text.
///
/// # Errors
///
/// Fails when the tree holds a value JSON cannot express.
pub fn cbor_to_json(value: Value, options: &Options) -> Result<Vec<u8>> {
    let json = normalize(value, options.byte_strings)?;
    let mut output = if options.pretty {
        serde_json::to_vec_pretty(&json)?
    } else {
        serde_json::to_vec(&json)?
    };
    if options.newline {
        output.push(b'\n');
    }
    Ok(output)
}

/// Encode a decoded JSON tree as CBOR.
///
/// # Errors
///
/// Fails when the CBOR encoder rejects the value.
pub fn json_to_cbor(value: Json) -> Result<Vec<u8>> {
    let cbor = coerce(value).into_cbor()?;
    let mut output = Vec::new();
    ciborium::into_writer(&cbor, &mut output)?;
    Ok(output)
}
