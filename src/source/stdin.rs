//! Piped stdin input.
//!
//! Stdin is read to EOF before the viewer starts; there is no live tailing.

use crate::model::error::InputError;
use crate::store::LineStore;
use std::io::{IsTerminal, Read};
use tracing::info;

/// Stdin (or any reader) to be read once into a store.
#[derive(Debug)]
pub struct StdinSource<R: Read> {
    reader: R,
}

impl StdinSource<std::io::Stdin> {
    /// Use the process's stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is an interactive terminal,
    /// which means the user forgot to pipe anything in.
    pub fn new() -> Result<Self, InputError> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        Ok(Self { reader: stdin })
    }
}

impl<R: Read> StdinSource<R> {
    /// Wrap any reader, skipping the terminal check.
    pub fn from_reader(reader: R) -> Self {
        Self { reader }
    }

    /// Read to EOF into a store. The total size is unknown up front.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` if reading fails.
    pub fn load(self) -> Result<LineStore, InputError> {
        let store = LineStore::load(self.reader, 0)?;
        info!(lines = store.line_count(), "Loaded stdin");
        Ok(store)
    }
}
