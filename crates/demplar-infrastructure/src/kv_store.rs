//! Key-value storage implementations.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use demplar_core::favorites::KeyValueStore;
use demplar_core::{DemplarError, Result};

use crate::paths::DemplarPaths;
use crate::storage::{AtomicFile, FileFormat};

/// Key-value storage persisted as one JSON object file.
///
/// Every `set` is a locked read-modify-write of the whole file, so writers in
/// separate processes do not lose each other's keys. A file that no longer
/// parses is replaced on the next `set`.
pub struct FileKeyValueStore {
    file: AtomicFile<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    /// Opens the store at its default location under the data directory.
    pub fn new(paths: &DemplarPaths) -> Result<Self> {
        Ok(Self::with_path(paths.local_storage_file()?))
    }

    /// Opens the store at an explicit path (used by tests).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::new(path, FileFormat::Json),
        }
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.file.load()?;
        Ok(values.and_then(|mut map| map.remove(key)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.file.update_or_reset(BTreeMap::new(), |map| {
            map.insert(key.to_string(), value.to_string());
            Ok(())
        })?;
        tracing::debug!("Stored key '{}' in {:?}", key, self.file.path());
        Ok(())
    }
}

/// Process-local key-value storage.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|e| DemplarError::internal(format!("Storage lock poisoned: {}", e)))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| DemplarError::internal(format!("Storage lock poisoned: {}", e)))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
