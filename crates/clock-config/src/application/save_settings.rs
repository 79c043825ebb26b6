//! Use case: write the configuration back to storage.
//!
//! Settings are merged into the property table that was loaded, so
//! properties the settings record does not know about are written back
//! unchanged.

use clock_core::{encode_properties, PropertyTable, Settings};
use tracing::{info, warn};

use super::recovery::Recovery;
use super::ConfigError;
use crate::infrastructure::storage::ConfigStorage;

/// How a save with recovery ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The configuration was written.
    Saved,
    /// Writing failed and the caller chose to ignore it.
    Skipped,
}

/// Encodes `properties` and writes them to `storage`.
///
/// # Errors
///
/// Returns [`ConfigError::Codec`] if encoding runs out of memory and
/// [`ConfigError::Storage`] if the write fails.
pub fn save_properties<S>(storage: &S, properties: &PropertyTable) -> Result<(), ConfigError>
where
    S: ConfigStorage + ?Sized,
{
    let bytes = encode_properties(properties)?;
    storage.write_all(&bytes)?;
    info!(properties = properties.len(), "configuration saved");
    Ok(())
}

/// Merges `settings` into `properties` and saves the result.
///
/// # Errors
///
/// As [`save_properties`], plus [`ConfigError::Property`] if the table
/// cannot grow.
pub fn save_settings<S>(
    storage: &S,
    properties: &mut PropertyTable,
    settings: &Settings,
) -> Result<(), ConfigError>
where
    S: ConfigStorage + ?Sized,
{
    settings.write_properties(properties)?;
    save_properties(storage, properties)
}

/// Saves `properties`, asking `on_error` what to do after each failure.
///
/// # Errors
///
/// Returns the last error when `on_error` answers [`Recovery::Abort`].
pub fn save_properties_with_recovery<S, F>(
    storage: &S,
    properties: &PropertyTable,
    mut on_error: F,
) -> Result<SaveOutcome, ConfigError>
where
    S: ConfigStorage + ?Sized,
    F: FnMut(&ConfigError, u32) -> Recovery,
{
    let mut failures = 0;
    loop {
        let err = match save_properties(storage, properties) {
            Ok(()) => return Ok(SaveOutcome::Saved),
            Err(err) => err,
        };
        failures += 1;
        match on_error(&err, failures) {
            Recovery::Retry => continue,
            Recovery::Ignore => {
                warn!("failed to save configuration: {err}; changes were not written");
                return Ok(SaveOutcome::Skipped);
            }
            Recovery::Abort => return Err(err),
        }
    }
}

/// Merges `settings` into `properties`, then saves with recovery.
///
/// # Errors
///
/// [`ConfigError::Property`] if the merge fails, otherwise as
/// [`save_properties_with_recovery`].
pub fn save_settings_with_recovery<S, F>(
    storage: &S,
    properties: &mut PropertyTable,
    settings: &Settings,
    on_error: F,
) -> Result<SaveOutcome, ConfigError>
where
    S: ConfigStorage + ?Sized,
    F: FnMut(&ConfigError, u32) -> Recovery,
{
    settings.write_properties(properties)?;
    save_properties_with_recovery(storage, properties, on_error)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
