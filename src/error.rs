//! Error types shared by the dictionary filter and the table printer.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the library.
#[derive(Debug, Error)]
pub enum Error {
    /// The input word list does not exist.
    #[error("file {} not found", .0.display())]
    NotFound(PathBuf),

    /// The table printer was started without any text.
    #[error("no text to print")]
    NoText,

    /// Minimum length is greater than the maximum (strict mode only).
    #[error("invalid length range: min ({min}) must be <= max ({max})")]
    MalformedThresholds { min: usize, max: usize },

    /// Regex pattern failed to compile.
    #[error("invalid regex pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Human-readable size could not be parsed.
    #[error("invalid size format: '{0}'")]
    InvalidSize(String),

    /// IO failure tied to a specific file.
    #[error("failed to access {}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;
