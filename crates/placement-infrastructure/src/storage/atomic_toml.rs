//! Crash-safe TOML persistence for the portal configuration.
//!
//! Writes go to a sibling temp file that is synced and renamed over the
//! target; read-modify-write cycles hold an exclusive lock file.

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use placement_core::{PortalError, Result};
use serde::{Serialize, de::DeserializeOwned};

/// A TOML document on disk.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads and parses the file. A missing or blank file yields `None`.
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(toml::from_str(&content)?))
    }

    /// Serializes `data` and replaces the file in one rename.
    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let rendered = toml::to_string_pretty(data)?;
        let tmp_path = self.temp_path()?;

        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(rendered.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        tracing::debug!(path = %self.path.display(), "Saved TOML file");
        Ok(())
    }

    /// Loads (or starts from `default_value`), applies `f`, and saves, all
    /// under an exclusive lock.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<T>
    where
        F: FnOnce(&mut T) -> Result<()>,
        T: Clone,
    {
        let _lock = LockGuard::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data)?;
        self.save(&data)?;
        Ok(data)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| PortalError::io(format!("Not a file path: {}", self.path.display())))?;
        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}

/// Exclusive lock held through a `.lock` sibling file; released on drop.
struct LockGuard {
    _file: File,
    lock_path: PathBuf,
}

impl LockGuard {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");
        if let Some(parent) = lock_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| PortalError::io(format!("Failed to lock {}: {}", lock_path.display(), e)))?;
        }

        Ok(Self {
            _file: file,
            lock_path,
        })
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Buckets {
        resumes: String,
        uploads: u32,
    }

    fn buckets() -> Buckets {
        Buckets {
            resumes: "resumes".to_string(),
            uploads: 0,
        }
    }

    #[test]
    fn test_missing_file_loads_none() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Buckets>::new(temp_dir.path().join("absent.toml"));
        assert!(file.load().unwrap().is_none());
        assert!(!file.exists());
    }

    #[test]
    fn test_save_creates_parent_and_leaves_no_temp() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let file = AtomicTomlFile::<Buckets>::new(path.clone());

        file.save(&buckets()).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("nested").join(".config.toml.tmp").exists());
        assert_eq!(file.load().unwrap(), Some(buckets()));
    }

    #[test]
    fn test_update_accumulates() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Buckets>::new(temp_dir.path().join("config.toml"));

        file.update(buckets(), |b| {
            b.uploads += 2;
            Ok(())
        })
        .unwrap();
        let updated = file
            .update(buckets(), |b| {
                b.uploads += 3;
                Ok(())
            })
            .unwrap();

        assert_eq!(updated.uploads, 5);
        assert_eq!(file.load().unwrap().unwrap().uploads, 5);
        assert!(!temp_dir.path().join("config.lock").exists());
    }

    #[test]
    fn test_failed_update_keeps_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Buckets>::new(temp_dir.path().join("config.toml"));
        file.save(&buckets()).unwrap();

        let result = file.update(buckets(), |b| {
            b.uploads = 99;
            Err(PortalError::validation("rejected"))
        });

        assert!(result.is_err());
        assert_eq!(file.load().unwrap().unwrap().uploads, 0);
    }

    #[test]
    fn test_invalid_toml_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "resumes = [").unwrap();

        let err = AtomicTomlFile::<Buckets>::new(path).load().unwrap_err();
        assert!(matches!(err, PortalError::Serialization { .. }));
    }
}
