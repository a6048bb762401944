//! Error types for doxmd.

use std::io;
use thiserror::Error;

/// Result type alias for doxmd operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a single document.
#[derive(Error, Debug)]
pub enum Error {
    /// The package cannot be opened or is missing its main content part.
    #[error("Corrupt package: {0}")]
    PackageCorrupt(String),

    /// A part of the package could not be parsed.
    #[error("Extraction error in {part}: {message}")]
    Extraction { part: String, message: String },

    /// Writing the Markdown output failed. Well-formed elements never trigger this.
    #[error("Rendering error: {0}")]
    Render(#[from] std::fmt::Error),

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration file.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn extraction(part: &str, message: impl std::fmt::Display) -> Self {
        Error::Extraction {
            part: part.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::PackageCorrupt(err.to_string())
    }
}
