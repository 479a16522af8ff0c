//! Error types for jlv.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via
//! `?` and `From` conversions up to [`AppError`], which is what `main` reports.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error wrapping all domain-specific failures
//!   - [`InputError`] - Log file/stdin reading failures (missing file, directory, IO)
//!   - [`ConfigError`] - Config file read/parse failures
//!   - [`LoggingError`] - Tracing subscriber setup failures
//!   - `std::io::Error` - Terminal/TUI rendering failures
//!
//! # Error Recovery Strategy
//!
//! Per-line parse failures are not errors at all: a line that is not a JSON
//! object degrades to [`ParseResult::Raw`](crate::parser::ParseResult::Raw) and
//! is displayed as plain text. Search failures are reported as "not found".
//! Only input, config and terminal failures reach this module.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// All domain-specific error types convert to `AppError` via `From`
/// implementations, enabling clean error propagation with the `?` operator.
///
/// # Examples
///
/// ```no_run
/// use jlv::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     // InputError automatically converts to AppError via From
///     let _input = read_log_file()?;
///     Ok(())
/// }
/// # fn read_log_file() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read input from file or stdin.
    ///
    /// **Recovery**: depends on where it fails. A read error while loading
    /// falls back to an empty store with the error in the status bar. A
    /// missing file, a directory or absent input is found while detecting the
    /// source; `main` reports it and exits.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// Configuration file exists but could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal or TUI rendering error.
    ///
    /// This indicates failures in the crossterm/ratatui layer, such as broken
    /// pipes or I/O errors during rendering. Fatal: the terminal is restored
    /// and the error is written to stderr.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when reading log input from files or stdin.
///
/// These are load-time errors. They are surfaced once to the caller as a
/// value; the line store the caller falls back to is validly empty.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified log file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use jlv::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.log")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.log"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// The path names a directory rather than a readable file.
    #[error("{path} is a directory")]
    IsDirectory {
        /// The directory path the user supplied.
        path: PathBuf,
    },

    /// No input source was provided - user must supply a file path or pipe stdin.
    ///
    /// This occurs when the application is invoked without a file argument and
    /// stdin is an interactive terminal.
    ///
    /// # Examples
    ///
    /// ```
    /// use jlv::model::error::InputError;
    ///
    /// let err = InputError::NoInput;
    /// assert!(err.to_string().contains("file path or pipe data to stdin"));
    /// ```
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// Generic I/O error reading from input source.
    ///
    /// Captures permission errors, disk read errors and broken pipes. The
    /// `#[from]` attribute lets `?` convert `std::io::Error` directly.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
