//! Unified error type for reelstream.
//!
//! Every failure the streaming core can report funnels into [`Error`], which
//! carries enough context for the HTTP layer to derive a status code via
//! [`Error::http_status`].

use std::fmt;

/// Unified error type covering all failure modes in reelstream.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested object could not be found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "object").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// An object identifier failed validation.
    #[error("Invalid object id: {0}")]
    InvalidObjectId(String),

    /// A `Range` header was present but could not be parsed.
    #[error("Malformed range: {0}")]
    MalformedRange(String),

    /// A `Range` header parsed but does not fit the object.
    #[error("Range not satisfiable: {range} (object size {size})")]
    UnsatisfiableRange {
        /// The raw header value as received.
        range: String,
        /// Total size of the object in bytes.
        size: u64,
    },

    /// Reading from storage failed (open, seek, stat or read).
    #[error("Storage read failed: {source}")]
    StorageRead {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The caller may not stream this object.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound { .. } => 404,
            Error::InvalidObjectId(_) => 400,
            Error::MalformedRange(_) => 400,
            Error::UnsatisfiableRange { .. } => 416,
            Error::StorageRead { .. } => 500,
            Error::Forbidden(_) => 403,
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::MalformedRange`].
    pub fn malformed_range(header: impl Into<String>) -> Self {
        Error::MalformedRange(header.into())
    }

    /// Convenience constructor for [`Error::UnsatisfiableRange`].
    pub fn unsatisfiable(range: impl Into<String>, size: u64) -> Self {
        Error::UnsatisfiableRange {
            range: range.into(),
            size,
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
