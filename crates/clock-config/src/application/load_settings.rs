//! Use case: load the stored configuration.
//!
//! A missing file is not an error: the first run of the screensaver has no
//! config yet, so [`load_config`] answers it with default settings and an
//! empty property table.  Every other failure (unreadable file, malformed
//! text) is reported so the caller can choose between retrying, carrying on
//! with defaults, and giving up; [`load_config_with_recovery`] runs that loop.

use clock_core::{decode_properties, PropertyTable, Settings};
use tracing::{info, warn};

use super::recovery::Recovery;
use super::ConfigError;
use crate::infrastructure::storage::{ConfigStorage, StorageError};

/// Where the loaded settings came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Parsed from the stored file.
    Stored,
    /// No file exists yet; defaults were used.
    Missing,
    /// Loading failed and the caller chose to ignore it; defaults were used.
    Recovered,
}

/// The result of a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    /// Every property found in the file, including ones [`Settings`] does
    /// not know about, so they survive the next save.
    pub properties: PropertyTable,
    /// Typed settings with defaults filled in.
    pub settings: Settings,
    pub source: LoadSource,
}

impl LoadedConfig {
    fn defaults(source: LoadSource) -> Self {
        Self {
            properties: PropertyTable::new(),
            settings: Settings::default(),
            source,
        }
    }
}

/// Loads and decodes the stored configuration.
///
/// # Errors
///
/// Returns [`ConfigError::Storage`] for read failures other than a missing
/// file and [`ConfigError::Codec`] if the contents are malformed.
pub fn load_config<S>(storage: &S) -> Result<LoadedConfig, ConfigError>
where
    S: ConfigStorage + ?Sized,
{
    match storage.read_all() {
        Ok(bytes) => {
            let properties = decode_properties(&bytes)?;
            let settings = Settings::from_properties(&properties);
            info!(properties = properties.len(), "configuration loaded");
            Ok(LoadedConfig {
                properties,
                settings,
                source: LoadSource::Stored,
            })
        }
        Err(StorageError::NotFound { path }) => {
            info!("no configuration at {}; using defaults", path.display());
            Ok(LoadedConfig::defaults(LoadSource::Missing))
        }
        Err(e) => Err(e.into()),
    }
}

/// Loads the configuration, asking `on_error` what to do after each failure.
///
/// `on_error` receives the error and the number of consecutive failures so
/// far (starting at 1).
///
/// # Errors
///
/// Returns the last error when `on_error` answers [`Recovery::Abort`].
pub fn load_config_with_recovery<S, F>(storage: &S, mut on_error: F) -> Result<LoadedConfig, ConfigError>
where
    S: ConfigStorage + ?Sized,
    F: FnMut(&ConfigError, u32) -> Recovery,
{
    let mut failures = 0;
    loop {
        let err = match load_config(storage) {
            Ok(loaded) => return Ok(loaded),
            Err(err) => err,
        };
        failures += 1;
        match on_error(&err, failures) {
            Recovery::Retry => continue,
            Recovery::Ignore => {
                warn!("failed to load configuration: {err}; continuing with defaults");
                return Ok(LoadedConfig::defaults(LoadSource::Recovered));
            }
            Recovery::Abort => return Err(err),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
