//! The property table and its typed accessors.

pub mod table;
pub mod typed;

pub use table::{Property, PropertyError, PropertyTable};
pub use typed::Rgb;
