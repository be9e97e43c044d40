//! Configuration model.
//!
//! Every section is defaulted so an empty or partial `config.toml` still
//! produces a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration read from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemplarConfig {
    pub content: ContentConfig,
    pub catalog: CatalogConfig,
    pub feedback: FeedbackConfig,
    pub storage: StorageConfig,
}

/// Where character and news records come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Content store project identifier. Empty means "not configured".
    pub project_id: String,
    pub dataset: String,
    /// API version date, e.g. `2024-01-01`.
    pub api_version: String,
    /// Read through the CDN edge instead of the live API.
    pub use_cdn: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Read characters from an exported snapshot instead of the content store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PathBuf>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            use_cdn: true,
            token: None,
            snapshot: None,
        }
    }
}

impl ContentConfig {
    /// Returns true when a remote project has been configured.
    pub fn has_remote(&self) -> bool {
        !self.project_id.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Character ids tagged as non-player when records are loaded.
    pub npc_character_ids: Vec<String>,
    /// Base URL used when composing share links.
    pub site_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            npc_character_ids: vec!["69".to_string()],
            site_url: "http://localhost:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub email: String,
    pub subject_prefix: String,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            email: "your@email.com".to_string(),
            subject_prefix: "Demplar".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Overrides the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}
