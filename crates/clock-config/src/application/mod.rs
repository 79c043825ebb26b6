//! Application layer: use cases for the configuration tool.
//!
//! Each sub-module implements one use case and depends only on
//! `clock_core` and on the [`ConfigStorage`] trait, never on a concrete file
//! system.  The binary wires them to [`FileStorage`].
//!
//! [`ConfigStorage`]: crate::infrastructure::storage::ConfigStorage
//! [`FileStorage`]: crate::infrastructure::storage::FileStorage

pub mod edit_properties;
pub mod load_settings;
pub mod recovery;
pub mod save_settings;

use clock_core::{CodecError, ErrorKind, PropertyError};
use thiserror::Error;

use crate::infrastructure::storage::StorageError;

/// Any failure of a configuration use case.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the stored bytes failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The stored bytes are not valid property text, or encoding ran out of memory.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Updating the in-memory property table failed.
    #[error(transparent)]
    Property(#[from] PropertyError),

    /// A property name contains characters the file format cannot represent.
    #[error("invalid property name {0:?}: names may only contain A-Z, a-z, 0-9, '_', '.' and '-'")]
    InvalidName(String),

    /// A property value contains a line break.
    #[error("value of property {0} must not contain a line break")]
    InvalidValue(String),
}

impl ConfigError {
    /// Returns the coarse category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::Storage(e) => e.kind(),
            ConfigError::Codec(e) => e.kind(),
            ConfigError::Property(e) => e.kind(),
            ConfigError::InvalidName(_) | ConfigError::InvalidValue(_) => ErrorKind::MalformedData,
        }
    }
}
