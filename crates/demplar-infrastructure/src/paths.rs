//! Path resolution for Demplar configuration and data files.
//!
//! ```text
//! ~/.config/demplar/            # Config directory
//! └── config.toml               # Application configuration
//!
//! ~/.local/share/demplar/       # Data directory (overridable)
//! └── local_storage.json        # Durable key-value storage (favorites)
//! ```

use std::path::PathBuf;

use demplar_core::DemplarError;

const APP_DIR: &str = "demplar";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
    /// The platform data directory could not be determined.
    DataDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
            PathError::DataDirNotFound => write!(f, "Cannot find data directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for DemplarError {
    fn from(err: PathError) -> Self {
        DemplarError::config(err.to_string())
    }
}

/// Resolves where Demplar keeps its files.
///
/// `data_dir_override` comes from the `[storage]` section of the config.
#[derive(Debug, Clone, Default)]
pub struct DemplarPaths {
    data_dir_override: Option<PathBuf>,
}

impl DemplarPaths {
    pub fn new(data_dir_override: Option<PathBuf>) -> Self {
        Self { data_dir_override }
    }

    /// Returns the Demplar configuration directory (e.g. `~/.config/demplar/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the data directory, honoring the configured override.
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(dir) = &self.data_dir_override {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::DataDirNotFound)
    }

    /// Returns the key-value storage file.
    pub fn local_storage_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("local_storage.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file() {
        if let Ok(path) = DemplarPaths::config_file() {
            assert!(path.ends_with("demplar/config.toml"));
        }
    }

    #[test]
    fn test_data_dir_override() {
        let paths = DemplarPaths::new(Some(PathBuf::from("/tmp/demplar-test")));
        assert_eq!(paths.data_dir().unwrap(), PathBuf::from("/tmp/demplar-test"));
        assert_eq!(
            paths.local_storage_file().unwrap(),
            PathBuf::from("/tmp/demplar-test/local_storage.json")
        );
    }

    #[test]
    fn test_path_error_converts_to_config_error() {
        let err: DemplarError = PathError::DataDirNotFound.into();
        assert!(matches!(err, DemplarError::Config(_)));
    }
}
