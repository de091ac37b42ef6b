//! Unified error type for tablon.
//!
//! Store and asset failures funnel into [`Error`], which carries enough
//! context for API handlers to derive an HTTP status code via
//! [`Error::http_status`].

use std::fmt;

/// Unified error type covering all failure modes in tablon.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested entity could not be found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "announcement", "image").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// Request data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The backing record file could not be read or written.
    #[error("Storage error: {source}")]
    Storage {
        /// The underlying encoder/decoder error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound { .. } => 404,
            Error::Validation(_) => 400,
            Error::Io { .. } => 500,
            Error::Storage { .. } => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::Storage`].
    pub fn storage(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Storage {
            source: source.into(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
