//! Error types for collection database decoding and encoding.

use std::string::FromUtf8Error;

use thiserror::Error;

/// Errors that can occur while reading or writing a collection database.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The stream ended before a primitive was fully read.
    #[error("unexpected end of stream: {context}")]
    UnexpectedEndOfStream {
        /// Context describing what was being read.
        context: String,
    },

    /// String payload bytes are not valid UTF-8.
    #[error("invalid utf-8: {context}")]
    InvalidUtf8 {
        /// Context describing where the string was read.
        context: String,
        /// The underlying conversion error.
        #[source]
        source: FromUtf8Error,
    },

    /// A variable-length integer does not fit the target width.
    #[error("varuint overflow: {context}")]
    VaruintOverflow {
        /// Context describing what was being decoded.
        context: String,
    },

    /// The file declares zero collections.
    #[error("collection file is empty")]
    EmptyCollectionFile,

    /// A count is too large to be written as a `u32`.
    #[error("count overflow: {context}")]
    CountOverflow {
        /// Context describing which count overflowed.
        context: String,
    },

    /// An I/O operation failed.
    #[error("I/O error during {context}: {source}")]
    Io {
        /// Context describing the operation.
        context: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CollectionError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            context: "unspecified".to_string(),
            source: err,
        }
    }
}

impl CollectionError {
    /// Creates an I/O error with context.
    pub fn io<S: Into<String>>(context: S, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Creates an unexpected end of stream error.
    pub fn eof<S: Into<String>>(context: S) -> Self {
        Self::UnexpectedEndOfStream {
            context: context.into(),
        }
    }

    /// Creates a varuint overflow error.
    pub fn overflow<S: Into<String>>(context: S) -> Self {
        Self::VaruintOverflow {
            context: context.into(),
        }
    }

    /// Returns `true` if the error was caused by a truncated stream.
    #[must_use]
    pub const fn is_truncation(&self) -> bool {
        matches!(self, Self::UnexpectedEndOfStream { .. })
    }
}

/// Result type for collection database operations.
pub type CollectionResult<T, E = CollectionError> = std::result::Result<T, E>;
