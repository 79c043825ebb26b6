//! File-based persistence for the properties file.
//!
//! The file lives at a platform-appropriate location:
//! - Windows:  `%LOCALAPPDATA%\ClockScreenSaver.properties`
//! - Linux:    `~/.config/clock-screensaver/ClockScreenSaver.properties`
//! - macOS:    `~/Library/Application Support/ClockScreenSaver/ClockScreenSaver.properties`
//!
//! # Atomic replacement (for beginners)
//!
//! Writing straight into the config file means a crash or a full disk halfway
//! through leaves a truncated file behind, and the next start would fail to
//! parse it.  [`FileStorage::write_all`] instead writes the new contents to a
//! sibling `*.tmp` file, flushes it to disk, and then renames it over the old
//! file.  A rename within one directory either happens completely or not at
//! all, so readers only ever see the old file or the new one.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use clock_core::ErrorKind;
use thiserror::Error;
use tracing::debug;

/// File name of the properties file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "ClockScreenSaver.properties";

/// Error type for configuration storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// The config file does not exist yet.
    #[error("config file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Returns the coarse category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::NotFound { .. } => ErrorKind::NotFound,
            StorageError::NoPlatformConfigDir | StorageError::Io { .. } => ErrorKind::IoFailure,
        }
    }
}

/// Byte-level access to the stored configuration.
///
/// The production implementation is [`FileStorage`]; application-layer tests
/// substitute a mock.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigStorage {
    /// Reads the complete stored configuration.
    ///
    /// # Errors
    ///
    /// [`StorageError::NotFound`] if nothing has been stored yet,
    /// [`StorageError::Io`] for any other failure.
    fn read_all(&self) -> Result<Vec<u8>, StorageError>;

    /// Replaces the stored configuration with `bytes`.
    ///
    /// # Errors
    ///
    /// [`StorageError::Io`] if the write fails.  The previously stored
    /// configuration must still be intact in that case.
    fn write_all(&self, bytes: &[u8]) -> Result<(), StorageError>;
}

/// [`ConfigStorage`] backed by a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Uses the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses the file at [`config_file_path`].
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NoPlatformConfigDir`] if the platform base
    /// directory cannot be determined.
    pub fn at_default_location() -> Result<Self, StorageError> {
        config_file_path().map(Self::new)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
        move |source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl ConfigStorage for FileStorage {
    fn read_all(&self) -> Result<Vec<u8>, StorageError> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                debug!(path = %self.path.display(), bytes = bytes.len(), "read config file");
                Ok(bytes)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::NotFound {
                path: self.path.clone(),
            }),
            Err(e) => Err(Self::io_error(&self.path)(e)),
        }
    }

    fn write_all(&self, bytes: &[u8]) -> Result<(), StorageError> {
        // Ensure directory exists before writing.
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(Self::io_error(dir))?;
        }

        let temp = self.temp_path();
        let result = write_synced(&temp, bytes)
            .map_err(Self::io_error(&temp))
            .and_then(|()| fs::rename(&temp, &self.path).map_err(Self::io_error(&self.path)));

        if result.is_err() {
            // The old file is untouched; only the partial temp file needs to go.
            let _ = fs::remove_file(&temp);
        } else {
            debug!(path = %self.path.display(), bytes = bytes.len(), "wrote config file");
        }
        result
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

// ── Path resolution ───────────────────────────────────────────────────────────

/// Resolves the full path to the properties file.
///
/// # Errors
///
/// Returns [`StorageError::NoPlatformConfigDir`] if the base directory cannot
/// be determined.
pub fn config_file_path() -> Result<PathBuf, StorageError> {
    platform_config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .ok_or(StorageError::NoPlatformConfigDir)
}

/// Resolves the directory that holds the properties file.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %LOCALAPPDATA% e.g. C:\Users\<user>\AppData\Local
        std::env::var_os("LOCALAPPDATA").map(PathBuf::from)
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("clock-screensaver"))
    }

    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support/ClockScreenSaver
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("ClockScreenSaver")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("clock_config_test_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_read_missing_file_returns_not_found() {
        // Arrange
        let dir = temp_dir();
        let storage = FileStorage::new(dir.join("absent.properties"));

        // Act
        let err = storage.read_all().unwrap_err();

        // Assert
        assert!(matches!(err, StorageError::NotFound { .. }), "got {err:?}");
        assert_eq!(err.kind(), ErrorKind::NotFound);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_then_read_returns_same_bytes() {
        // Arrange
        let dir = temp_dir();
        let storage = FileStorage::new(dir.join(CONFIG_FILE_NAME));

        // Act
        storage.write_all(b"scale=80\n").unwrap();
        let bytes = storage.read_all().unwrap();

        // Assert
        assert_eq!(bytes, b"scale=80\n");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_replaces_previous_contents_and_leaves_no_temp_file() {
        let dir = temp_dir();
        let storage = FileStorage::new(dir.join(CONFIG_FILE_NAME));

        storage.write_all(b"scale=80\nspace=20\n").unwrap();
        storage.write_all(b"scale=1\n").unwrap();

        assert_eq!(storage.read_all().unwrap(), b"scale=1\n");
        assert!(!storage.temp_path().exists());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_creates_missing_parent_directories() {
        let dir = temp_dir();
        let storage = FileStorage::new(dir.join("nested").join("deeper").join(CONFIG_FILE_NAME));

        storage.write_all(b"").unwrap();

        assert!(storage.path().exists());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_failed_write_keeps_previous_file() {
        // Arrange: make the temp path a directory so File::create fails
        let dir = temp_dir();
        let storage = FileStorage::new(dir.join(CONFIG_FILE_NAME));
        storage.write_all(b"scale=80\n").unwrap();
        fs::create_dir_all(storage.temp_path()).unwrap();

        // Act
        let err = storage.write_all(b"scale=10\n").unwrap_err();

        // Assert
        assert_eq!(err.kind(), ErrorKind::IoFailure);
        assert_eq!(storage.read_all().unwrap(), b"scale=80\n");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_read_directory_is_io_failure() {
        let dir = temp_dir();
        let storage = FileStorage::new(&dir);

        let err = storage.read_all().unwrap_err();

        assert_eq!(err.kind(), ErrorKind::IoFailure);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_temp_path_is_sibling_with_tmp_suffix() {
        let storage = FileStorage::new("/some/dir/ClockScreenSaver.properties");
        assert_eq!(
            storage.temp_path(),
            PathBuf::from("/some/dir/ClockScreenSaver.properties.tmp")
        );
    }

    #[test]
    fn test_config_file_path_ends_with_file_name() {
        if let Ok(path) = config_file_path() {
            assert!(
                path.ends_with(CONFIG_FILE_NAME),
                "config file must be named {CONFIG_FILE_NAME}, got {path:?}"
            );
        }
        // NoPlatformConfigDir (e.g. in a stripped CI env) is also acceptable.
    }

    #[test]
    fn test_error_messages_include_path() {
        let err = StorageError::NotFound {
            path: PathBuf::from("/tmp/x.properties"),
        };
        assert!(err.to_string().contains("/tmp/x.properties"));
    }
}
