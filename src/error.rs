//! Error types for the invidx library.
//!
//! All fallible operations return [`IndexError`] through the crate-wide
//! [`Result`] alias. Errors are plain values: nothing in the library retries
//! or terminates the process, callers decide what to do with them.
//!
//! # Examples
//!
//! ```
//! use invidx::error::{IndexError, Result};
//!
//! fn check(ids: &[u64]) -> Result<()> {
//!     if ids.is_empty() {
//!         return Err(IndexError::EmptyCollection);
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(&[]).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for invidx operations.
#[derive(Error, Debug)]
pub enum IndexError {
    /// A caller-supplied value violates a precondition, e.g. a posting list
    /// that is not strictly ascending, or an index too large for the file format.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Persisted or encoded bytes could not be decoded.
    #[error("Corrupt format: {0}")]
    CorruptFormat(String),

    /// I/O errors (open, read, write, rename).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An index was requested from zero documents.
    #[error("Empty collection: at least one document is required")]
    EmptyCollection,

    /// JSON errors from document and configuration files.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with [`IndexError`].
pub type Result<T> = std::result::Result<T, IndexError>;

impl IndexError {
    /// Create a new invalid input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        IndexError::InvalidInput(msg.into())
    }

    /// Create a new corrupt format error.
    pub fn corrupt<S: Into<String>>(msg: S) -> Self {
        IndexError::CorruptFormat(msg.into())
    }

    /// Prefix a corrupt format message with where the bad bytes were found.
    ///
    /// Other variants pass through untouched.
    pub fn context<S: AsRef<str>>(self, ctx: S) -> Self {
        match self {
            IndexError::CorruptFormat(msg) => {
                IndexError::CorruptFormat(format!("{}: {msg}", ctx.as_ref()))
            }
            other => other,
        }
    }

    /// Returns true if this error was caused by malformed encoded data.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, IndexError::CorruptFormat(_))
    }
}
