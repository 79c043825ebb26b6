//! Domain entities for the clock screensaver.
//!
//! This module holds the typed settings record and its defaults.  Like the
//! rest of the crate it has no OS or file-system dependencies, so it can be
//! tested in isolation.

/// Screensaver settings and their mapping onto properties.
///
/// See [`settings::Settings`] for the main type.
pub mod settings;
