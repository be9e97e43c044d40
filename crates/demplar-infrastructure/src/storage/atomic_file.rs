//! Atomic file operations with locking.
//!
//! Provides:
//! - **Atomicity**: writes go to a temp file that is renamed over the target
//! - **Isolation**: read-modify-write cycles hold an exclusive `fs2` lock
//! - **Durability**: explicit fsync before rename

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use demplar_core::{DemplarError, Result};

/// On-disk encoding of an [`AtomicFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn parse<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        match self {
            FileFormat::Json => Ok(serde_json::from_str(content)?),
            FileFormat::Toml => Ok(toml::from_str(content)?),
        }
    }

    fn render<T: Serialize>(&self, data: &T) -> Result<String> {
        match self {
            FileFormat::Json => Ok(serde_json::to_string_pretty(data)?),
            FileFormat::Toml => Ok(toml::to_string_pretty(data)?),
        }
    }
}

/// A handle to a typed file that is always replaced atomically.
pub struct AtomicFile<T> {
    path: PathBuf,
    format: FileFormat,
    _phantom: PhantomData<T>,
}

impl<T> AtomicFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf, format: FileFormat) -> Self {
        Self {
            path,
            format,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and parses the file.
    ///
    /// Returns `Ok(None)` when the file does not exist or is blank.
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        self.format.parse(&content).map(Some)
    }

    /// Serializes `data` and replaces the file with it.
    pub fn save(&self, data: &T) -> Result<()> {
        let rendered = self.format.render(data)?;
        write_atomic(&self.path, rendered.as_bytes())
    }

    /// Loads the current value (or `default_value`), applies `f` and saves
    /// the result, all under an exclusive lock.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<()>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data)?;
        self.save(&data)
    }

    /// Like [`update`](Self::update), but a file that fails to parse starts
    /// over from `default_value` and is overwritten.
    pub fn update_or_reset<F>(&self, default_value: T, f: F) -> Result<()>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = match self.load() {
            Ok(loaded) => loaded.unwrap_or(default_value),
            Err(e) if e.is_serialization() => {
                tracing::warn!("Discarding unreadable {:?}: {}", self.path, e);
                default_value
            }
            Err(e) => return Err(e),
        };
        f(&mut data)?;
        self.save(&data)
    }
}

/// Writes `bytes` to `path` through a temp file in the same directory.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| DemplarError::io(format!("Path has no parent directory: {:?}", path)))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| DemplarError::io(format!("Path has no file name: {:?}", path)))?;

    if !parent.as_os_str().is_empty() && !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = parent.join(format!(".{}.tmp", file_name.to_string_lossy()));
    let mut tmp_file = File::create(&tmp_path)?;
    tmp_file.write_all(bytes)?;
    tmp_file.sync_all()?;
    drop(tmp_file);

    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// A lock guard on `<path>.lock`, released when dropped.
///
/// The lock file itself stays on disk: every locker must open the same inode.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        use fs2::FileExt;

        let lock_path = path.with_extension("lock");
        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;
        file.lock_exclusive()
            .map_err(|e| DemplarError::data_access(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        use fs2::FileExt;

        let _ = self.file.unlock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load_toml() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Counter>::new(temp_dir.path().join("c.toml"), FileFormat::Toml);

        let value = Counter {
            name: "test".to_string(),
            count: 42,
        };
        file.save(&value).unwrap();
        assert_eq!(file.load().unwrap(), Some(value));
    }

    #[test]
    fn test_load_missing_or_blank() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blank.json");
        let file = AtomicFile::<Counter>::new(path.clone(), FileFormat::Json);
        assert!(file.load().unwrap().is_none());

        fs::write(&path, "  \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_json_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "{ nope").unwrap();
        let file = AtomicFile::<Counter>::new(path, FileFormat::Json);
        assert!(file.load().unwrap_err().is_serialization());
    }

    #[test]
    fn test_update_creates_then_modifies() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("map.json");
        let file = AtomicFile::<BTreeMap<String, String>>::new(path.clone(), FileFormat::Json);

        file.update(BTreeMap::new(), |map| {
            map.insert("a".to_string(), "1".to_string());
            Ok(())
        })
        .unwrap();
        file.update(BTreeMap::new(), |map| {
            map.insert("b".to_string(), "2".to_string());
            Ok(())
        })
        .unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(!temp_dir.path().join("nested").join(".map.json.tmp").exists());
    }

    #[test]
    fn test_lock_file_outlives_update() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("map.json");
        let file = AtomicFile::<BTreeMap<String, String>>::new(path.clone(), FileFormat::Json);
        let lock_path = path.with_extension("lock");

        file.update(BTreeMap::new(), |_| Ok(())).unwrap();
        assert!(lock_path.exists());

        // A second cycle reuses the same lock file.
        file.update(BTreeMap::new(), |map| {
            map.insert("k".to_string(), "v".to_string());
            Ok(())
        })
        .unwrap();
        assert!(lock_path.exists());
        assert_eq!(file.load().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_update_rejects_corrupt_file_but_reset_repairs_it() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("map.json");
        fs::write(&path, "garbage").unwrap();
        let file = AtomicFile::<BTreeMap<String, String>>::new(path.clone(), FileFormat::Json);

        let err = file.update(BTreeMap::new(), |_| Ok(())).unwrap_err();
        assert!(err.is_serialization());
        assert_eq!(fs::read_to_string(&path).unwrap(), "garbage");

        file.update_or_reset(BTreeMap::new(), |map| {
            map.insert("a".to_string(), "1".to_string());
            Ok(())
        })
        .unwrap();
        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded.get("a").map(String::as_str), Some("1"));
    }
}
