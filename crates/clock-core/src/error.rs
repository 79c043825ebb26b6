//! Coarse error classification shared by every layer.
//!
//! Each error type in the workspace keeps its own detailed variants, but all
//! of them can be collapsed into one [`ErrorKind`].  Callers that only need to
//! decide *what to do* (fall back to defaults, offer a retry, give up) match
//! on the kind instead of on the individual error enums.

use std::fmt;

/// The category of a configuration failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The config file or the requested property does not exist.
    NotFound,
    /// The config text violates the `name=value` line grammar.
    MalformedData,
    /// A property exists but its value does not parse as the requested type.
    InvalidType,
    /// An allocation failed while mutating or decoding a table.
    OutOfMemory,
    /// The storage layer failed to read or write the config file.
    IoFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::NotFound => "not found",
            ErrorKind::MalformedData => "malformed data",
            ErrorKind::InvalidType => "invalid type",
            ErrorKind::OutOfMemory => "out of memory",
            ErrorKind::IoFailure => "I/O failure",
        };
        f.write_str(label)
    }
}
