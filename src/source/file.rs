//! File input.
//!
//! A file is validated when the source is created and read once when the
//! store is loaded.

use crate::model::error::InputError;
use crate::store::LineStore;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// An opened log file, not yet read.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    file: File,
    size: u64,
}

impl FileSource {
    /// Open `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if nothing exists at `path`,
    /// `InputError::IsDirectory` for directories and `InputError::Io` for
    /// anything else that stops the file from opening.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        if path.is_dir() {
            return Err(InputError::IsDirectory {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        let size = file.metadata()?.len();

        Ok(Self {
            path: path.to_path_buf(),
            file,
            size,
        })
    }

    /// Path the file was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File size in bytes at open time.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Read the whole file into a store, using its size to pre-size storage.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` if reading fails part way.
    pub fn load(self) -> Result<LineStore, InputError> {
        let store = LineStore::load(self.file, self.size)?;
        info!(
            path = %self.path.display(),
            bytes = self.size,
            lines = store.line_count(),
            "Loaded file"
        );
        Ok(store)
    }
}
