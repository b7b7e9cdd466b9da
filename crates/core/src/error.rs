//! Error types for Trellis.

use alloc::string::String;
use core::fmt;

/// Result type alias for Trellis operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for result-set operations.
///
/// All variants are caller mistakes surfaced before any partial output is
/// produced. Exhaustion of a row source is a normal return value, never an
/// error, and soft source failures (a refused rewind) are tolerated by the
/// bulk materializers rather than reported here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A descriptor or argument referenced a column the first row
    /// does not have.
    UnknownColumn {
        column: String,
    },
    /// The associative descriptor itself is malformed.
    InvalidDescriptor {
        message: String,
    },
    /// A malformed argument combination (e.g. a key column without a
    /// value column, or too few columns for auto-detection).
    InvalidArgument {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownColumn { column } => {
                write!(f, "Unknown column: {}", column)
            }
            Error::InvalidDescriptor { message } => {
                write!(f, "Invalid descriptor: {}", message)
            }
            Error::InvalidArgument { message } => {
                write!(f, "Invalid argument: {}", message)
            }
        }
    }
}

impl Error {
    /// Creates an unknown column error.
    pub fn unknown_column(column: impl Into<String>) -> Self {
        Error::UnknownColumn {
            column: column.into(),
        }
    }

    /// Creates an invalid descriptor error.
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        Error::InvalidDescriptor {
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }
}
