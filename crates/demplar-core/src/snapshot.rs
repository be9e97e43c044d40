//! Exported snapshots of the character collection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::character::Character;
use crate::error::Result;

/// File name used when no export path is given.
pub const DEFAULT_SNAPSHOT_FILE: &str = "demplar-chars.json";

/// The full character collection at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub exported_at: DateTime<Utc>,
    pub characters: Vec<Character>,
}

impl CatalogSnapshot {
    pub fn new(characters: Vec<Character>) -> Self {
        Self {
            exported_at: Utc::now(),
            characters,
        }
    }
}

/// Repository trait for snapshot persistence.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Writes `snapshot` to `path`, replacing any existing file.
    async fn export(&self, path: &Path, snapshot: &CatalogSnapshot) -> Result<()>;

    /// Reads a snapshot back, migrating older schema versions.
    async fn import(&self, path: &Path) -> Result<CatalogSnapshot>;
}
