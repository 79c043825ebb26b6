//! Use case: set a raw property by name.
//!
//! The property table itself accepts any string, but the file format
//! cannot represent every string: names are limited to key characters and a
//! value must fit on one line.  [`set_property`] checks both before touching
//! the table so that a save never produces a file that fails to load.

use clock_core::codec::is_valid_name;
use clock_core::PropertyTable;
use tracing::debug;

use super::ConfigError;

/// Checks that `name=value` can be written and read back.
///
/// Leading and trailing whitespace in `value` is allowed but will not
/// survive a reload.
///
/// # Errors
///
/// [`ConfigError::InvalidName`] or [`ConfigError::InvalidValue`].
pub fn validate_property(name: &str, value: &str) -> Result<(), ConfigError> {
    if !is_valid_name(name) {
        return Err(ConfigError::InvalidName(name.to_string()));
    }
    validate_value(name, value)
}

/// Checks that `value` fits on one line of the file.
///
/// # Errors
///
/// [`ConfigError::InvalidValue`] if `value` contains `\n` or `\r`.
pub fn validate_value(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.contains(|c: char| c == '\n' || c == '\r') {
        return Err(ConfigError::InvalidValue(name.to_string()));
    }
    Ok(())
}

/// Validates and stores `name=value` in `properties`.
///
/// # Errors
///
/// As [`validate_property`], plus [`ConfigError::Property`] if the table
/// cannot grow.
pub fn set_property(properties: &mut PropertyTable, name: &str, value: &str) -> Result<(), ConfigError> {
    validate_property(name, value)?;
    let replaced = properties.contains(name);
    properties.set(name, value)?;
    debug!(name, replaced, "property set");
    Ok(())
}
