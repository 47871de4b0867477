//! Configuration service implementation.
//!
//! Loads [`PortalConfig`] from `config.toml`, layers environment overrides on
//! top, and caches the result.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use placement_core::config::PortalConfig;
use placement_core::{PortalError, Result};

use crate::paths::PortalPaths;
use crate::storage::AtomicTomlFile;

/// Overrides `service.base_url`.
pub const ENV_SERVICE_URL: &str = "PLACEMENT_SERVICE_URL";
/// Overrides `service.api_key`.
pub const ENV_API_KEY: &str = "PLACEMENT_API_KEY";

/// Configuration service that loads and caches the portal configuration.
///
/// The file is read lazily on first access. Environment overrides are applied
/// on every load but never written back to disk.
#[derive(Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<PortalConfig>>>,
}

impl ConfigService {
    /// Creates a service for the default config location.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(PortalPaths::default().config_file()?))
    }

    /// Creates a service for an explicit config file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<PortalConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        let mut loaded = self.load_from_file()?;
        apply_env_overrides(&mut loaded, |key| std::env::var(key).ok());

        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    /// Writes `config` to disk and drops the cache.
    pub fn save(&self, config: &PortalConfig) -> Result<()> {
        self.file().save(config)?;
        self.invalidate_cache();
        tracing::info!("[Config] Saved configuration to {}", self.path.display());
        Ok(())
    }

    /// Applies `f` to the stored configuration under the file lock.
    pub fn update<F>(&self, f: F) -> Result<PortalConfig>
    where
        F: FnOnce(&mut PortalConfig) -> Result<()>,
    {
        let updated = self.file().update(PortalConfig::default(), f)?;
        self.invalidate_cache();
        Ok(updated)
    }

    /// Writes a default configuration file.
    ///
    /// Refuses to overwrite an existing file unless `force` is set.
    pub fn init_default(&self, force: bool) -> Result<&Path> {
        if self.path.exists() && !force {
            return Err(PortalError::config(format!(
                "{} already exists (use --force to overwrite)",
                self.path.display()
            )));
        }
        self.save(&PortalConfig::default())?;
        Ok(&self.path)
    }

    fn load_from_file(&self) -> Result<PortalConfig> {
        match self.file().load()? {
            Some(config) => {
                tracing::debug!("[Config] Loaded {}", self.path.display());
                Ok(config)
            }
            None => {
                tracing::debug!(
                    "[Config] No config at {}, using defaults",
                    self.path.display()
                );
                Ok(PortalConfig::default())
            }
        }
    }

    fn file(&self) -> AtomicTomlFile<PortalConfig> {
        AtomicTomlFile::new(self.path.clone())
    }
}

/// Layers environment overrides onto `config`. Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut PortalConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_SERVICE_URL).filter(|v| !v.trim().is_empty()) {
        config.service.base_url = url.trim().to_string();
    }
    if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
        config.service.api_key = key.trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        let mut config = service.get_config().unwrap();
        // The ambient environment may carry overrides; compare the rest.
        config.service = Default::default();
        assert_eq!(config, PortalConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        let mut config = PortalConfig::default();
        config.routes.login = "/sign-in".to_string();
        config.storage.resume_bucket = "cv".to_string();
        service.save(&config).unwrap();

        let loaded = service.get_config().unwrap();
        assert_eq!(loaded.routes.login, "/sign-in");
        assert_eq!(loaded.storage.resume_bucket, "cv");
    }

    #[test]
    fn test_cache_until_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::with_path(path.clone());

        assert_eq!(service.get_config().unwrap().routes.login, "/login");

        std::fs::write(&path, "[routes]\nlogin = \"/enter\"\n").unwrap();
        assert_eq!(service.get_config().unwrap().routes.login, "/login");

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().routes.login, "/enter");
    }

    #[test]
    fn test_init_force_replaces_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "this is [not toml").unwrap();
        let service = ConfigService::with_path(path.clone());

        assert!(service.get_config().is_err());
        assert!(service.init_default(false).unwrap_err().is_config());

        assert_eq!(service.init_default(true).unwrap(), path.as_path());
        assert_eq!(service.get_config().unwrap().routes, PortalConfig::default().routes);
    }

    #[test]
    fn test_update_persists() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        service
            .update(|config| {
                config.service.timeout_secs = 5;
                Ok(())
            })
            .unwrap();

        assert_eq!(service.get_config().unwrap().service.timeout_secs, 5);
    }

    #[test]
    fn test_init_default_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        service.init_default(false).unwrap();
        assert!(service.init_default(false).unwrap_err().is_config());
        assert!(service.init_default(true).is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_SERVICE_URL, " https://abc.example.co "),
            (ENV_API_KEY, ""),
        ]
        .into_iter()
        .collect();

        let mut config = PortalConfig::default();
        config.service.api_key = "from-file".to_string();
        apply_env_overrides(&mut config, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.service.base_url, "https://abc.example.co");
        assert_eq!(config.service.api_key, "from-file");
    }
}
