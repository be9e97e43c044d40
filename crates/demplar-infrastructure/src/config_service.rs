//! Configuration service.
//!
//! Loads `DemplarConfig` from `~/.config/demplar/config.toml`, applies
//! environment overrides and caches the result.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use demplar_core::config::DemplarConfig;
use demplar_core::{DemplarError, Result};

use crate::paths::DemplarPaths;
use crate::storage::{AtomicFile, FileFormat};

pub const ENV_PROJECT_ID: &str = "DEMPLAR_PROJECT_ID";
pub const ENV_DATASET: &str = "DEMPLAR_DATASET";
pub const ENV_TOKEN: &str = "DEMPLAR_TOKEN";
pub const ENV_SNAPSHOT: &str = "DEMPLAR_SNAPSHOT";

/// Configuration service that loads and caches the configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config file; `None` resolves the platform default.
    path: Option<PathBuf>,
    config: Arc<RwLock<Option<DemplarConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the default config file.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading an explicit config file.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Ok(DemplarPaths::config_file()?),
        }
    }

    /// Returns the effective configuration, loading it on first access.
    ///
    /// A missing file yields the defaults; a malformed file is an error.
    pub fn get_config(&self) -> Result<DemplarConfig> {
        {
            let cached = self
                .config
                .read()
                .map_err(|e| DemplarError::internal(format!("Config lock poisoned: {}", e)))?;
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let mut loaded = self.load_config()?;
        apply_env_overrides(&mut loaded, |key| std::env::var(key).ok());

        let mut cached = self
            .config
            .write()
            .map_err(|e| DemplarError::internal(format!("Config lock poisoned: {}", e)))?;
        *cached = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut cached) = self.config.write() {
            *cached = None;
        }
    }

    /// Writes a default config file and returns its path.
    ///
    /// Refuses to overwrite an existing file unless `force` is set.
    pub fn init_default(&self, force: bool) -> Result<PathBuf> {
        let path = self.config_path()?;
        if path.exists() && !force {
            return Err(DemplarError::validation(format!(
                "Config file already exists: {}",
                path.display()
            )));
        }

        AtomicFile::new(path.clone(), FileFormat::Toml).save(&DemplarConfig::default())?;
        self.invalidate_cache();
        tracing::info!("Wrote default configuration to {}", path.display());
        Ok(path)
    }

    fn load_config(&self) -> Result<DemplarConfig> {
        let path = self.config_path()?;
        let file = AtomicFile::<DemplarConfig>::new(path.clone(), FileFormat::Toml);
        match file.load() {
            Ok(Some(config)) => {
                tracing::debug!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            Ok(None) => {
                tracing::debug!("No configuration at {}, using defaults", path.display());
                Ok(DemplarConfig::default())
            }
            Err(e) => Err(DemplarError::config(format!(
                "Failed to load {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Overlays `DEMPLAR_*` variables onto `config`. Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut DemplarConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(project_id) = var(ENV_PROJECT_ID) {
        config.content.project_id = project_id;
    }
    if let Some(dataset) = var(ENV_DATASET) {
        config.content.dataset = dataset;
    }
    if let Some(token) = var(ENV_TOKEN) {
        config.content.token = Some(token);
    }
    if let Some(snapshot) = var(ENV_SNAPSHOT) {
        config.content.snapshot = Some(PathBuf::from(snapshot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        let config = service.get_config().unwrap();
        assert_eq!(config.content.dataset, "production");
        assert_eq!(config.feedback.email, "your@email.com");
    }

    #[test]
    fn test_loads_file_and_caches() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[content]\nproject_id = \"abc123\"\n\n[catalog]\nnpc_character_ids = [\"69\", \"70\"]\n",
        )
        .unwrap();

        let service = ConfigService::with_path(path.clone());
        let config = service.get_config().unwrap();
        assert_eq!(config.catalog.npc_character_ids.len(), 2);

        std::fs::write(&path, "[content]\nproject_id = \"changed\"\n").unwrap();
        assert_eq!(service.get_config().unwrap().catalog.npc_character_ids.len(), 2);

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().catalog.npc_character_ids, vec!["69"]);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[content\nproject_id = ").unwrap();
        let err = ConfigService::with_path(path).get_config().unwrap_err();
        assert!(matches!(err, DemplarError::Config(_)));
    }

    #[test]
    fn test_init_default_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("demplar").join("config.toml"));

        let path = service.init_default(false).unwrap();
        assert!(path.exists());
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("dataset = \"production\""));

        assert!(service.init_default(false).unwrap_err().is_validation());
        assert!(service.init_default(true).is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_PROJECT_ID, "proj"),
            (ENV_DATASET, "staging"),
            (ENV_TOKEN, ""),
            (ENV_SNAPSHOT, "/tmp/chars.json"),
        ]
        .into_iter()
        .collect();

        let mut config = DemplarConfig::default();
        apply_env_overrides(&mut config, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.content.project_id, "proj");
        assert_eq!(config.content.dataset, "staging");
        assert_eq!(config.content.token, None);
        assert_eq!(config.content.snapshot, Some(PathBuf::from("/tmp/chars.json")));
    }
}
