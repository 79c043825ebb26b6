//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module handles:
//!
//! - Resolving the platform-appropriate location of the properties file.
//! - Reading the whole file as bytes, reporting a missing file separately
//!   from other I/O failures.
//! - Replacing the file atomically so a failed save never corrupts the
//!   previous version.
//!
//! The byte format itself lives in `clock_core::codec`; this module never
//! looks inside the bytes.

pub mod config;

pub use config::{config_file_path, ConfigStorage, FileStorage, StorageError};
