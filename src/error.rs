//! Error types and handling for the converter
//!
//! Every failure is terminal for the single conversion. Each variant maps to a
//! non-zero exit code so scripts can tell input problems from data problems.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Error kinds reported by the `cbor` tool
#[derive(Error, Debug)]
pub enum CliError {
    // ═══════════════════════════════════════════════════════════════
    // Input Acquisition
    // ═══════════════════════════════════════════════════════════════
    /// Reading standard input failed
    #[error("stdin error: {0}")]
    Stdin(#[source] io::Error),

    /// Reading the input file failed
    #[error("failed to read file {}: {source}", .path.display())]
    FileRead {
        /// Path given on the command line
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// The command line could not be parsed
    #[error("{0}")]
    Arguments(String),

    /// Standard input is a terminal and no file was given
    #[error("no input: pipe data on stdin or pass a file path")]
    NoInput,

    // ═══════════════════════════════════════════════════════════════
    // Format Detection
    // ═══════════════════════════════════════════════════════════════
    /// Input decoded neither as CBOR nor as JSON
    #[error("invalid CBOR or JSON value")]
    InvalidInput,

    // ═══════════════════════════════════════════════════════════════
    // Encoding
    // ═══════════════════════════════════════════════════════════════
    /// A decoded value has no representation in the target format
    #[error("cannot encode {target}: {reason}")]
    Unrepresentable {
        /// Target format name
        target: &'static str,
        /// Which value was rejected and why
        reason: String,
    },

    /// The JSON encoder failed
    #[error("JSON encode error: {0}")]
    JsonEncode(#[source] serde_json::Error),

    /// The CBOR encoder failed
    #[error("CBOR encode error: {0}")]
    CborEncode(#[source] ciborium::ser::Error<io::Error>),

    // ═══════════════════════════════════════════════════════════════
    // Output
    // ═══════════════════════════════════════════════════════════════
    /// Writing the converted document failed
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl CliError {
    /// Get the exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) | Self::Stdin(_) | Self::FileRead { .. } | Self::NoInput => 2,
            Self::InvalidInput
            | Self::Unrepresentable { .. }
            | Self::JsonEncode(_)
            | Self::CborEncode(_) => 65,
            Self::Output(_) => 74,
        }
    }

    /// Whether the usage text should follow the message
    pub const fn shows_usage(&self) -> bool {
        matches!(
            self,
            Self::Arguments(_)
                | Self::Stdin(_)
                | Self::FileRead { .. }
                | Self::NoInput
                | Self::InvalidInput
        )
    }

    pub(crate) fn unrepresentable_json(reason: impl Into<String>) -> Self {
        Self::Unrepresentable {
            target: "JSON",
            reason: reason.into(),
        }
    }

    pub(crate) fn unrepresentable_cbor(reason: impl Into<String>) -> Self {
        Self::Unrepresentable {
            target: "CBOR",
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Self::Output(err.into())
        } else {
            Self::JsonEncode(err)
        }
    }
}

impl From<ciborium::ser::Error<io::Error>> for CliError {
    fn from(err: ciborium::ser::Error<io::Error>) -> Self {
        match err {
            ciborium::ser::Error::Io(e) => Self::Output(e),
            other => Self::CborEncode(other),
        }
    }
}
