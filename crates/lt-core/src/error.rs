//! Unified error type for lectern.
//!
//! Everything a request can fail with funnels into [`Error`], which carries
//! enough context for the HTTP layer to derive a status code via
//! [`Error::http_status`].

use std::fmt;

/// Unified error type covering all request-level failure modes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed path, wrong extension, or malformed range header.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The requested entity could not be found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "video", "subtitle").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// The requested byte range lies outside the resource.
    #[error("Range not satisfiable for length {total}")]
    RangeNotSatisfiable {
        /// Total length of the resource, echoed in `Content-Range: bytes */total`.
        total: u64,
    },

    /// A configuration file could not be parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::BadRequest(_) => 400,
            Error::NotFound { .. } => 404,
            Error::RangeNotSatisfiable { .. } => 416,
            Error::Config(_) => 500,
            Error::Io { .. } => 500,
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

    /// Classify an error from opening or inspecting a file.
    ///
    /// `NotFound` becomes [`Error::NotFound`]; anything else stays an I/O error.
    pub fn from_open(entity: impl Into<String>, id: impl fmt::Display, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::not_found(entity, id)
        } else {
            Error::Io { source: err }
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
