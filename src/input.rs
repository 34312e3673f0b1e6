//! Input acquisition
//!
//! The whole document is read into memory before conversion starts.

use crate::error::{CliError, Result};
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

/// Where the input document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Standard input
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl Source {
    /// Pick the input source.
    ///
    /// A file argument wins over standard input; `-` names standard input
    /// explicitly. Without an argument, standard input is used unless it is an
    /// interactive terminal.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::NoInput`] when there is neither a file argument nor
    /// piped input.
    pub fn resolve(file: Option<&Path>) -> Result<Self> {
        Self::resolve_with(file, io::stdin().is_terminal())
    }

    fn resolve_with(file: Option<&Path>, stdin_is_terminal: bool) -> Result<Self> {
        match file {
            Some(path) if path == Path::new("-") => Ok(Self::Stdin),
            Some(path) => Ok(Self::File(path.to_path_buf())),
            None if stdin_is_terminal => Err(CliError::NoInput),
            None => Ok(Self::Stdin),
        }
    }

    /// Read the full input.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Stdin`] or [`CliError::FileRead`] when reading fails.
    pub fn read_all(&self) -> Result<Vec<u8>> {
        let bytes = match self {
            Self::Stdin => {
                let mut buf = Vec::new();
                let _ = io::stdin()
                    .lock()
                    .read_to_end(&mut buf)
                    .map_err(CliError::Stdin)?;
                buf
            }
            Self::File(path) => fs::read(path).map_err(|source| CliError::FileRead {
                path: path.clone(),
                source,
            })?,
        };
        tracing::debug!(source = ?self, bytes = bytes.len(), "read input");
        Ok(bytes)
    }
}
