#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

//! # Architecture
//!
//! - **[`value`]** - Generic value model between the two codecs
//! - **[`normalize`]** - CBOR to JSON translation (string keys, byte strings)
//! - **[`json`]** - JSON document tree keeping number literals
//! - **[`coerce`]** - JSON to CBOR translation (typed numbers)
//! - **[`convert`]** - Format detection and the two conversion pipelines
//! - **[`input`]** - Reading the document from a file or stdin
//! - **[`config`]** - Conversion options
//! - **[`cli`]** - Command-line parsing and usage text
//! - **[`error`]** - Error types and exit codes

pub mod cli;
pub mod coerce;
pub mod config;
pub mod convert;
pub mod error;
pub mod input;
pub mod json;
pub mod normalize;
pub mod value;

/// Error type alias for convenience
pub use error::{CliError, Result};

/// Conversion entry points
pub use convert::{convert, Conversion, Format};

/// Options type alias for convenience
pub use config::{ByteStrings, Options};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
