//! Snapshot repository implementation.
//!
//! Stores the character collection as versioned JSON. Uses version-migrate so
//! older exports keep loading after the schema changes.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use version_migrate::Migrator;

use demplar_core::snapshot::{CatalogSnapshot, SnapshotRepository};
use demplar_core::{DemplarError, Result};

use crate::dto::create_snapshot_migrator;
use crate::storage::write_atomic;

const ENTITY: &str = "catalog_snapshot";

/// File-based snapshot repository with version migration support.
pub struct FileSnapshotRepository {
    migrator: Migrator,
}

impl FileSnapshotRepository {
    pub fn new() -> Self {
        Self {
            migrator: create_snapshot_migrator(),
        }
    }

    /// Serializes a snapshot with its schema version.
    pub fn render(&self, snapshot: &CatalogSnapshot) -> Result<String> {
        self.migrator
            .save_domain_flat(ENTITY, snapshot.clone())
            .map_err(|e| DemplarError::Migration(format!("Failed to serialize snapshot: {}", e)))
    }

    /// Parses and migrates a serialized snapshot.
    pub fn parse(&self, content: &str) -> Result<CatalogSnapshot> {
        let json_value: serde_json::Value = serde_json::from_str(content)?;
        self.migrator
            .load_flat_from(ENTITY, json_value)
            .map_err(|e| DemplarError::Migration(format!("Failed to migrate snapshot: {}", e)))
    }
}

impl Default for FileSnapshotRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotRepository for FileSnapshotRepository {
    async fn export(&self, path: &Path, snapshot: &CatalogSnapshot) -> Result<()> {
        let serialized = self.render(snapshot)?;
        let target: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || write_atomic(&target, serialized.as_bytes()))
            .await
            .map_err(|e| DemplarError::internal(format!("Export task failed: {}", e)))??;

        tracing::info!(
            "Exported {} characters to {}",
            snapshot.characters.len(),
            path.display()
        );
        Ok(())
    }

    async fn import(&self, path: &Path) -> Result<CatalogSnapshot> {
        if !path.exists() {
            return Err(DemplarError::not_found("snapshot", path.display().to_string()));
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| DemplarError::io(format!("Failed to read snapshot: {}", e)))?;
        let snapshot = self.parse(&content)?;
        tracing::debug!(
            "Imported {} characters from {}",
            snapshot.characters.len(),
            path.display()
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use demplar_core::character::{Character, Faction, Standing};
    use tempfile::TempDir;

    fn snapshot() -> CatalogSnapshot {
        CatalogSnapshot::new(vec![
            Character::new("1", "Aria", 17)
                .with_class("Ranger")
                .with_faction(Faction::known("f-p", "Pond")),
            Character::new("69", "The Watcher", 99).with_standing(Standing::Npc),
        ])
    }

    #[tokio::test]
    async fn test_export_then_import() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("demplar-chars.json");
        let repo = FileSnapshotRepository::new();

        let original = snapshot();
        repo.export(&path, &original).await.unwrap();
        let loaded = repo.import(&path).await.unwrap();

        assert_eq!(loaded.characters, original.characters);
        assert_eq!(loaded.exported_at, original.exported_at);
    }

    #[tokio::test]
    async fn test_export_includes_version() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.json");
        let repo = FileSnapshotRepository::new();
        repo.export(&path, &snapshot()).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], "1.0.0");
        assert_eq!(raw["characters"][1]["npc"], true);
    }

    #[tokio::test]
    async fn test_import_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = FileSnapshotRepository::new()
            .import(&temp_dir.path().join("missing.json"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_import_garbage_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(FileSnapshotRepository::new().import(&path).await.is_err());
    }
}
