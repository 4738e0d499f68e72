//! Global error handling for repodump
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project.

use std::io;
use thiserror::Error;

use crate::git::GitError;

/// Global error type for repodump operations
#[derive(Error, Debug)]
pub enum RepoDumpError {
    /// Input is neither a remote URL nor an existing local directory
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Git-related errors (acquiring a remote repository)
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid glob pattern
    #[error("Pattern error: {0}")]
    Pattern(String),
}

/// Specialized Result type for repodump operations
pub type Result<T> = std::result::Result<T, RepoDumpError>;

/// Creates a RepoDumpError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::RepoDumpError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait for adding context to errors
pub trait ResultExt<T, E> {
    /// Add additional context to an error, reporting it as invalid input
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E: std::error::Error + 'static> ResultExt<T, E> for std::result::Result<T, E> {
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|e| {
            let context = f();
            RepoDumpError::InvalidInput(format!("{}: {}", context, e))
        })
    }
}

// Allow converting RepoDumpError to io::Error for io-based callers and tests
impl From<RepoDumpError> for io::Error {
    fn from(err: RepoDumpError) -> Self {
        match err {
            RepoDumpError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}
