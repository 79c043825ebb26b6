//! Infrastructure layer for the configuration tool.
//!
//! Contains OS-facing adapters.  Today that is only file-system storage for
//! the properties file.
//!
//! **Dependency rule**: this layer may depend on `clock_core`, but MUST NOT
//! import anything from the `application` layer.

pub mod storage;
