//! Log input sources.
//!
//! Input is either a file named on the command line or data piped to stdin.
//! Both are read completely into a [`LineStore`] before the viewer starts.

use crate::model::error::InputError;
use crate::store::LineStore;
use std::path::PathBuf;

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::StdinSource;

/// Where the log comes from. Exactly one variant.
#[derive(Debug)]
pub enum InputSource {
    /// A named file, read once.
    File(FileSource),
    /// Piped stdin, read to EOF.
    Stdin(StdinSource<std::io::Stdin>),
}

impl InputSource {
    /// Name for the status bar.
    pub fn display_name(&self) -> String {
        match self {
            InputSource::File(f) => f.path().display().to_string(),
            InputSource::Stdin(_) => "[stdin]".to_string(),
        }
    }

    /// Read the source into a store.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for read failures.
    pub fn load(self) -> Result<LineStore, InputError> {
        match self {
            InputSource::File(f) => f.load(),
            InputSource::Stdin(s) => s.load(),
        }
    }
}

/// Pick the input source.
///
/// A file path wins; without one, stdin is used if it is piped.
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is a
/// terminal, `InputError::FileNotFound` or `InputError::IsDirectory` for a
/// bad path, and `InputError::Io` when the file cannot be opened.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(FileSource::new(path)?)),
        None => Ok(InputSource::Stdin(StdinSource::new()?)),
    }
}
