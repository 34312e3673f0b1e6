//! Conversion options
//!
//! The tool has no configuration file. Command-line flags are folded into
//! [`Options`], whose defaults live here in one place.

use clap::ValueEnum;

/// How CBOR byte strings are written to JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ByteStrings {
    /// Standard base64 with padding, as a JSON string
    #[default]
    Base64,
    /// An array of integers 0..=255
    Array,
}

/// Options shared by both conversion directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Rendering of byte strings in JSON output
    pub byte_strings: ByteStrings,

    /// Indent JSON output
    pub pretty: bool,

    /// Terminate JSON output with a newline
    pub newline: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            byte_strings: ByteStrings::default(),
            pretty: false,
            newline: true,
        }
    }
}
