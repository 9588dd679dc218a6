//! OS directory resolution for config, data and logs.

use std::io;
use std::path::{Path, PathBuf};

/// Directory name used under every OS base directory.
pub const APP_NAME: &str = "geophagia";

/// Errors that can occur while resolving or creating directories.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    /// Directory creation failed.
    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

/// OS-specific directories (XDG on Linux, Known Folders on Windows,
/// Library on macOS).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Default location for saved heightmaps.
    pub data_dir: PathBuf,
    /// Log files.
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve directories without creating them on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NoConfigDir`] if the OS does not expose a
    /// configuration directory.
    pub fn resolve() -> Result<Self, PlatformError> {
        let app_config = dirs::config_dir()
            .ok_or(PlatformError::NoConfigDir)?
            .join(APP_NAME);

        let data_dir = dirs::data_dir()
            .map(|base| base.join(APP_NAME))
            .unwrap_or_else(|| app_config.join("data"));

        Ok(Self {
            log_dir: app_config.join("logs"),
            config_dir: app_config,
            data_dir,
        })
    }

    /// Directories rooted under `root`, for `--config` and tests.
    pub fn resolve_with_root(root: &Path) -> Self {
        Self {
            config_dir: root.to_path_buf(),
            data_dir: root.join("data"),
            log_dir: root.join("logs"),
        }
    }

    /// Create all directories on disk.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        for dir in [&self.config_dir, &self.data_dir, &self.log_dir] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}
