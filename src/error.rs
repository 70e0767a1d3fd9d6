//! @ai:module:intent Define error types for the annotation scanner
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for all scanner operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid pattern table: {0}")]
    InvalidPattern(String),

    #[error("Invalid configuration {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::InvalidPattern(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
