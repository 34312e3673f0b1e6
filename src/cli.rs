//! Command-line interface argument parsing
//!
//! Defines the arguments using Clap and the usage text printed with input errors.

use crate::config::{ByteStrings, Options};
use crate::error::{CliError, Result};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Usage text shown after input and format errors
pub const USAGE: &str = "\
cbor.

Turns CBOR into JSON or JSON into CBOR.

cat file.json | cbor > file.cbor
cat file.cbor | cbor > file.json
cbor file.json > file.cbor
cbor file.cbor > file.json
";

/// cbor - convert CBOR to JSON and JSON to CBOR
#[derive(Parser, Debug)]
#[command(name = "cbor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Turns CBOR into JSON or JSON into CBOR")]
#[command(long_about = concat!(
    "cbor (v", env!("CARGO_PKG_VERSION"), ")\n",
    "Detects whether the input is CBOR or JSON and writes it in the other format.\n\n",
    "CBOR is tried first; input that is not a single complete CBOR item is read as JSON."
))]
#[command(after_help = USAGE)]
pub struct Cli {
    /// Input file; reads standard input when omitted or `-`
    pub file: Option<PathBuf>,

    /// Indent JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// How CBOR byte strings are written to JSON
    #[arg(long, value_enum, default_value_t = ByteStrings::Base64)]
    pub bytes: ByteStrings,

    /// Do not end JSON output with a newline
    #[arg(long)]
    pub no_newline: bool,

    /// Enable verbose output for debugging (on stderr)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse command-line arguments
    ///
    /// # Returns
    ///
    /// Parsed CLI arguments
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Arguments`] for a malformed command line. `--help`
    /// and `--version` print and exit here.
    pub fn parse_args() -> Result<Self> {
        Self::parse_from_args(std::env::args_os())
    }

    /// Parse an explicit argument list, program name first
    ///
    /// # Errors
    ///
    /// Same as [`Cli::parse_args`].
    pub fn parse_from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args).map_err(|err| {
            if !err.use_stderr() {
                err.exit()
            }
            let rendered = err.to_string();
            let first = rendered.lines().next().unwrap_or_default();
            CliError::Arguments(first.trim_start_matches("error: ").to_string())
        })
    }

    /// Conversion options selected by the flags
    pub const fn options(&self) -> Options {
        Options {
            byte_strings: self.bytes,
            pretty: self.pretty,
            newline: !self.no_newline,
        }
    }
}
