//! JSON document tree with numbers kept as source literals
//!
//! `serde_json` rewrites number text while parsing (`1e400` comes back as
//! `1e+400`), so numbers are captured through [`RawValue`] instead: every
//! node is first taken as a raw slice of the input, and containers are
//! descended into slice by slice. A number leaf is then exactly the bytes the
//! document contained.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::value::RawValue;
use std::collections::HashMap;
use std::fmt;

/// A decoded JSON node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Json {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Number literal as written in the document
    Number(String),
    /// String, unescaped
    String(String),
    /// Array
    Array(Vec<Self>),
    /// Object in document order; a repeated key keeps its first position and
    /// its last value
    Object(Vec<(String, Self)>),
}

impl Json {
    /// Parse one JSON document, surrounded by whitespace at most.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` syntax error for malformed input.
    pub fn parse(input: &str) -> serde_json::Result<Self> {
        let raw: &RawValue = serde_json::from_str(input)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: &RawValue) -> serde_json::Result<Self> {
        let text = raw.get().trim();
        let node = match text.as_bytes().first() {
            Some(b'{') => {
                let Entries(entries) = serde_json::from_str(text)?;
                let mut object: Vec<(String, Self)> = Vec::with_capacity(entries.len());
                let mut index: HashMap<String, usize> = HashMap::with_capacity(entries.len());
                for (key, value) in entries {
                    let value = Self::from_raw(value)?;
                    if let Some(&at) = index.get(&key) {
                        object[at].1 = value;
                    } else {
                        let _ = index.insert(key.clone(), object.len());
                        object.push((key, value));
                    }
                }
                Self::Object(object)
            }
            Some(b'[') => {
                let items: Vec<&RawValue> = serde_json::from_str(text)?;
                Self::Array(
                    items
                        .into_iter()
                        .map(Self::from_raw)
                        .collect::<serde_json::Result<Vec<_>>>()?,
                )
            }
            Some(b'"') => Self::String(serde_json::from_str(text)?),
            Some(b't' | b'f') => Self::Bool(serde_json::from_str(text)?),
            Some(b'n') => Self::Null,
            _ => Self::Number(text.to_string()),
        };
        Ok(node)
    }
}

/// Object members as raw slices, in document order
struct Entries<'a>(Vec<(String, &'a RawValue)>);

impl<'de> Deserialize<'de> for Entries<'de> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EntriesVisitor)
    }
}

struct EntriesVisitor;

impl<'de> Visitor<'de> for EntriesVisitor {
    type Value = Entries<'de>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<String, &'de RawValue>()? {
            entries.push(entry);
        }
        Ok(Entries(entries))
    }
}
