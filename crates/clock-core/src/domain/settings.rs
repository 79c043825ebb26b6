//! Typed screensaver settings.
//!
//! [`Settings`] maps one-to-one onto named properties:
//!
//! | field             | property        | type   | default  |
//! |-------------------|-----------------|--------|----------|
//! | `scale`           | `scale`         | uint   | `80`     |
//! | `space`           | `space`         | uint   | `20`     |
//! | `show_seconds`    | `showSeconds`   | bool   | `yes`    |
//! | `use_custom_font` | `useCustomFont` | bool   | `no`     |
//! | `font_name`       | `fontName`      | string | empty    |
//! | `font_weight`     | `fontWeight`    | uint   | `0`      |
//! | `font_italic`     | `fontItalic`    | bool   | `no`     |
//! | `fg_color`        | `fgColor`       | rgb    | `FFFFFF` |
//! | `bg_color`        | `bgColor`       | rgb    | `000000` |
//!
//! Reading never fails: a field whose property is missing or does not parse
//! as its type takes its default, independently of every other field.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ErrorKind;
use crate::properties::table::{PropertyError, PropertyTable};
use crate::properties::typed::Rgb;

/// Property names used by [`Settings`].
pub mod keys {
    pub const SCALE: &str = "scale";
    pub const SPACE: &str = "space";
    pub const SHOW_SECONDS: &str = "showSeconds";
    pub const USE_CUSTOM_FONT: &str = "useCustomFont";
    pub const FONT_NAME: &str = "fontName";
    pub const FONT_WEIGHT: &str = "fontWeight";
    pub const FONT_ITALIC: &str = "fontItalic";
    pub const FG_COLOR: &str = "fgColor";
    pub const BG_COLOR: &str = "bgColor";
}

/// Font weight meaning "let the font mapper choose".
pub const FONT_WEIGHT_DONT_CARE: u32 = 0;

/// Upper bound of the percentage fields (`scale`, `space`).
pub const PERCENT_MAX: u32 = 100;

/// Everything the screensaver needs to render the clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Clock height as a percentage of the screen height.
    pub scale: u32,
    /// Gap between digit groups as a percentage of the digit width.
    pub space: u32,
    pub show_seconds: bool,
    /// When `false` the built-in font is used and the `font_*` fields are ignored.
    pub use_custom_font: bool,
    pub font_name: String,
    pub font_weight: u32,
    pub font_italic: bool,
    pub fg_color: Rgb,
    pub bg_color: Rgb,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scale: 80,
            space: 20,
            show_seconds: true,
            use_custom_font: false,
            font_name: String::new(),
            font_weight: FONT_WEIGHT_DONT_CARE,
            font_italic: false,
            fg_color: Rgb::WHITE,
            bg_color: Rgb::BLACK,
        }
    }
}

impl Settings {
    /// Builds settings from `props`, filling every missing or unparsable
    /// field with its default.
    ///
    /// # Example
    ///
    /// ```rust
    /// use clock_core::{decode_properties, Settings};
    ///
    /// let props = decode_properties(b"scale=50\nshowSeconds=maybe\n").unwrap();
    /// let settings = Settings::from_properties(&props);
    /// assert_eq!(settings.scale, 50);
    /// assert!(settings.show_seconds); // unrecognised, default kept
    /// ```
    pub fn from_properties(props: &PropertyTable) -> Self {
        let defaults = Self::default();
        Self {
            scale: or_default(props.get_uint(keys::SCALE), defaults.scale),
            space: or_default(props.get_uint(keys::SPACE), defaults.space),
            show_seconds: or_default(props.get_bool(keys::SHOW_SECONDS), defaults.show_seconds),
            use_custom_font: or_default(
                props.get_bool(keys::USE_CUSTOM_FONT),
                defaults.use_custom_font,
            ),
            font_name: or_default(
                props.get(keys::FONT_NAME).map(str::to_string),
                defaults.font_name,
            ),
            font_weight: or_default(props.get_uint(keys::FONT_WEIGHT), defaults.font_weight),
            font_italic: or_default(props.get_bool(keys::FONT_ITALIC), defaults.font_italic),
            fg_color: or_default(props.get_rgb(keys::FG_COLOR), defaults.fg_color),
            bg_color: or_default(props.get_rgb(keys::BG_COLOR), defaults.bg_color),
        }
    }

    /// Writes every field into `props` in canonical form.
    ///
    /// Existing values are replaced in place and unrelated properties are
    /// left alone.  New properties are appended in a fixed order.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::OutOfMemory`] if the table cannot grow.
    /// Fields written before the failure keep their new values.
    pub fn write_properties(&self, props: &mut PropertyTable) -> Result<(), PropertyError> {
        props.set_uint(keys::SCALE, self.scale)?;
        props.set_uint(keys::SPACE, self.space)?;
        props.set_bool(keys::SHOW_SECONDS, self.show_seconds)?;
        props.set_bool(keys::USE_CUSTOM_FONT, self.use_custom_font)?;
        props.set(keys::FONT_NAME, &self.font_name)?;
        props.set_uint(keys::FONT_WEIGHT, self.font_weight)?;
        props.set_bool(keys::FONT_ITALIC, self.font_italic)?;
        props.set_rgb(keys::BG_COLOR, self.bg_color)?;
        props.set_rgb(keys::FG_COLOR, self.fg_color)?;
        Ok(())
    }

    /// Returns a fresh property table holding exactly these settings.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::OutOfMemory`] if the table cannot grow.
    pub fn to_properties(&self) -> Result<PropertyTable, PropertyError> {
        let mut props = PropertyTable::new();
        self.write_properties(&mut props)?;
        Ok(props)
    }
}

fn or_default<T>(result: Result<T, PropertyError>, default: T) -> T {
    match result {
        Ok(value) => value,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("{err}; using default");
            default
        }
        Err(err) => {
            warn!("{err}; using default");
            default
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
