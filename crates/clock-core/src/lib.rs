//! # clock-core
//!
//! Configuration store for the clock screensaver: an ordered property table,
//! typed accessors layered over its raw string values, and the line-oriented
//! text codec used to persist it.
//!
//! This crate has no file-system or OS dependencies.  Reading and writing the
//! bytes is the job of the `clock-config` crate.
//!
//! # Architecture overview (for beginners)
//!
//! The screensaver stores its settings in a small text file that looks like
//! this:
//!
//! ```text
//! scale=80
//! space=20
//! showSeconds=yes
//! fgColor=FFFFFF
//! ```
//!
//! The crate is organised in three layers:
//!
//! - **`properties`** – The [`PropertyTable`]: an ordered name → value map
//!   where every value is a plain string.  Typed helpers (`get_uint`,
//!   `set_bool`, `get_rgb`, …) convert between those strings and Rust types.
//!
//! - **`codec`** – Turns the bytes of a config file into a [`PropertyTable`]
//!   and back.  The grammar is strict: a malformed line fails the whole
//!   decode instead of being silently skipped.
//!
//! - **`domain`** – The [`Settings`] record the screensaver actually uses,
//!   with a documented default for every field.

pub mod codec;
pub mod domain;
pub mod error;
pub mod properties;

// Re-export the most-used types at the crate root so callers can write
// `clock_core::PropertyTable` instead of `clock_core::properties::table::PropertyTable`.
pub use codec::text::{decode_properties, encode_properties, CodecError, MalformedReason};
pub use domain::settings::Settings;
pub use error::ErrorKind;
pub use properties::table::{Property, PropertyError, PropertyTable};
pub use properties::typed::Rgb;
