//! Typed accessors layered over the raw string values of a [`PropertyTable`].
//!
//! Each accessor is a pure conversion to and from a canonical text form; no
//! extra state is stored in the table.
//!
//! | type | written as              | accepted on read                         |
//! |------|-------------------------|------------------------------------------|
//! | uint | decimal digits          | decimal digits only, must fit in `u32`   |
//! | bool | `yes` / `no`            | `yes`, `true`, `no`, `false` (any case)  |
//! | rgb  | `RRGGBB` uppercase hex  | first 6 characters, any case             |
//!
//! Color decoding is lenient: a character that is not a hex digit decodes as
//! `0` instead of being rejected.  Only a value shorter than six characters is
//! treated as invalid.

use std::fmt;

use serde::{Serialize, Serializer};

use super::table::{PropertyError, PropertyTable};

/// An RGB color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Decodes the first six characters of `text` as `RRGGBB`.
    ///
    /// Returns `None` when `text` has fewer than six characters.  Characters
    /// that are not hex digits count as `0`.
    ///
    /// ```rust
    /// use clock_core::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex_lenient("ff00a0"), Some(Rgb::new(255, 0, 160)));
    /// assert_eq!(Rgb::from_hex_lenient("GG0000"), Some(Rgb::new(0, 0, 0)));
    /// assert_eq!(Rgb::from_hex_lenient("FFF"), None);
    /// ```
    pub fn from_hex_lenient(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let mut channel = || -> Option<u8> {
            let high = hex_nibble(chars.next()?);
            let low = hex_nibble(chars.next()?);
            Some((high << 4) | low)
        };
        let red = channel()?;
        let green = channel()?;
        let blue = channel()?;
        Some(Self { red, green, blue })
    }

    /// Canonical `RRGGBB` form with uppercase digits.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn hex_nibble(c: char) -> u8 {
    c.to_digit(16).map_or(0, |d| d as u8)
}

/// Parses a canonical unsigned integer: one or more ASCII digits, no sign,
/// no surrounding whitespace.
pub fn parse_uint(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Parses one of the recognised boolean literals, ignoring ASCII case.
pub fn parse_bool(text: &str) -> Option<bool> {
    let matches = |literal: &str| text.eq_ignore_ascii_case(literal);
    if matches("yes") || matches("true") {
        Some(true)
    } else if matches("no") || matches("false") {
        Some(false)
    } else {
        None
    }
}

/// Canonical text form of a boolean.
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

impl PropertyTable {
    /// Reads `name` as an unsigned decimal integer.
    ///
    /// # Errors
    ///
    /// [`PropertyError::NotFound`] if absent, [`PropertyError::InvalidType`]
    /// if the value has anything other than digits (`"12x"` is rejected, not
    /// truncated) or does not fit in a `u32`.
    pub fn get_uint(&self, name: &str) -> Result<u32, PropertyError> {
        let raw = self.get(name)?;
        parse_uint(raw).ok_or_else(|| invalid(name, "unsigned integer", raw))
    }

    /// Writes `value` as a decimal string.
    pub fn set_uint(&mut self, name: &str, value: u32) -> Result<(), PropertyError> {
        self.set(name, &value.to_string())
    }

    /// Reads `name` as a boolean (`yes`/`true`/`no`/`false`, any case).
    ///
    /// # Errors
    ///
    /// [`PropertyError::NotFound`] if absent, [`PropertyError::InvalidType`]
    /// for any other literal such as `"1"` or `"on"`.
    pub fn get_bool(&self, name: &str) -> Result<bool, PropertyError> {
        let raw = self.get(name)?;
        parse_bool(raw).ok_or_else(|| invalid(name, "boolean", raw))
    }

    /// Writes `value` as `yes` or `no`.
    pub fn set_bool(&mut self, name: &str, value: bool) -> Result<(), PropertyError> {
        self.set(name, format_bool(value))
    }

    /// Reads `name` as an `RRGGBB` color.
    ///
    /// # Errors
    ///
    /// [`PropertyError::NotFound`] if absent, [`PropertyError::InvalidType`]
    /// if the value is shorter than six characters.
    pub fn get_rgb(&self, name: &str) -> Result<Rgb, PropertyError> {
        let raw = self.get(name)?;
        Rgb::from_hex_lenient(raw).ok_or_else(|| invalid(name, "RGB color", raw))
    }

    /// Writes `value` as six uppercase hex digits.
    pub fn set_rgb(&mut self, name: &str, value: Rgb) -> Result<(), PropertyError> {
        self.set(name, &value.to_hex())
    }
}

fn invalid(name: &str, expected: &'static str, value: &str) -> PropertyError {
    PropertyError::InvalidType {
        name: name.to_string(),
        expected,
        value: value.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
