//! Path management for placement configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/placement/         # Config directory (platform config dir)
//! └── config.toml              # Portal configuration
//! ```

use std::path::PathBuf;

use placement_core::PortalError;

const APP_DIR: &str = "placement";
const CONFIG_FILE: &str = "config.toml";

/// Resolves where the portal keeps its files.
///
/// An explicit base directory (tests, `--config`) takes precedence over the
/// platform config directory.
#[derive(Debug, Clone, Default)]
pub struct PortalPaths {
    base: Option<PathBuf>,
}

impl PortalPaths {
    pub fn new(base: Option<PathBuf>) -> Self {
        Self { base }
    }

    /// Returns the configuration directory (e.g. `~/.config/placement/`).
    pub fn config_dir(&self) -> Result<PathBuf, PortalError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| PortalError::config("Cannot determine the user config directory"))
    }

    /// Returns the path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PortalError> {
        Ok(self.config_dir()?.join(CONFIG_FILE))
    }
}
