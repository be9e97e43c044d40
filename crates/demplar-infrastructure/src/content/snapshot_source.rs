//! Offline content source backed by an exported snapshot.

use async_trait::async_trait;
use std::path::PathBuf;

use demplar_core::Result;
use demplar_core::character::Character;
use demplar_core::content::ContentSource;
use demplar_core::news::NewsEntry;
use demplar_core::snapshot::SnapshotRepository;

use crate::snapshot_repository::FileSnapshotRepository;

/// Serves characters from a snapshot file. Snapshots carry no news.
pub struct SnapshotContentSource {
    path: PathBuf,
    repository: FileSnapshotRepository,
}

impl SnapshotContentSource {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            repository: FileSnapshotRepository::new(),
        }
    }
}

#[async_trait]
impl ContentSource for SnapshotContentSource {
    async fn fetch_characters(&self) -> Result<Vec<Character>> {
        Ok(self.repository.import(&self.path).await?.characters)
    }

    async fn fetch_news(&self) -> Result<Vec<NewsEntry>> {
        Ok(Vec::new())
    }
}
