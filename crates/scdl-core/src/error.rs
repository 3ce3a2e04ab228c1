//! Crate-level error type.
//!
//! A non-302 answer from the API is not an error: it is reported as
//! [`crate::resolver::Resolution::Unresolved`] so callers can tell "the API
//! said no" apart from "something broke".

use std::io;

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The reference or resolved URL could not be parsed. Raised before any I/O.
    #[error("invalid URL: {0}")]
    Parse(#[from] url::ParseError),

    /// `load` was called on a session that has no resolved URL.
    #[error("URL not resolved, call `resolve` first")]
    Unresolved,

    /// `end_stream` was called before any file was loaded.
    #[error("no file was loaded, nothing to clean up")]
    NothingToClean,

    /// Progress was requested but the response declared no usable `Content-Length`.
    #[error("cannot compute progress: response has no usable Content-Length")]
    Division,

    /// Filesystem failure (directory creation, write, delete), passed through unmodified.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// libcurl reported a failure (DNS, connect, TLS, ...).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] curl::Error),
}

impl Error {
    /// The underlying I/O error kind, if this is a filesystem failure.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Error::Io(e) => Some(e.kind()),
            _ => None,
        }
    }
}
