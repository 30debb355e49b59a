//! Unified error handling for texinvert
//!
//! One error type covers every failure the batch inverter can report,
//! from an unusable target directory to a texture that cannot be written
//! back to disk.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for all texinvert operations
#[derive(Error, Debug)]
pub enum Error {
    // ==================== I/O Errors ====================

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Target directory does not exist
    #[error("Directory not found: {0}")]
    InvalidDirectory(PathBuf),

    /// Target path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    // ==================== Texture Errors ====================

    /// Texture bytes could not be decoded as an image
    #[error("Failed to decode {path}: {message}")]
    Decode {
        path: PathBuf,
        message: String,
    },

    /// Decoded image uses a layout the inverter cannot re-encode
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat {
        path: PathBuf,
        format: String,
    },

    /// Inverted texture could not be written back
    #[error("Failed to write {path}: {message}")]
    Write {
        path: PathBuf,
        message: String,
    },

    // ==================== Batch Errors ====================

    /// One or more files failed while the batch kept going
    #[error("{failed} of {total} textures failed")]
    BatchFailed {
        failed: usize,
        total: usize,
    },

    /// Custom error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

/// Result type using the unified Error
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Error::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create a decode error for `path`
    pub fn decode(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Error::Decode {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create a write error for `path`
    pub fn write(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Error::Write {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Strip any `WithContext` wrappers
    pub fn root(&self) -> &Error {
        match self {
            Error::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.root(),
            Error::InvalidDirectory(_) | Error::NotADirectory(_)
        )
    }

    /// Check if this is a decode/format error
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self.root(),
            Error::Decode { .. } | Error::UnsupportedFormat { .. }
        )
    }

    /// Check if this is a write-back error
    pub fn is_write_error(&self) -> bool {
        matches!(self.root(), Error::Write { .. })
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
