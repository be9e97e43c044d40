//! News feed use case.

use std::sync::Arc;

use demplar_core::content::ContentSource;
use demplar_core::news::{
    ContentBlock, NewsEntry, format_content, preview, reading_time_minutes, sort_latest_first,
};
use demplar_core::{DemplarError, Result};

/// A news entry prepared for display.
#[derive(Debug, Clone)]
pub struct NewsArticle<'a> {
    pub entry: &'a NewsEntry,
    /// True for the first entry of the feed.
    pub is_latest: bool,
    pub content: String,
    /// Shortened body; `None` when the body is shown in full.
    pub preview: Option<String>,
    pub reading_time_minutes: Option<usize>,
}

impl NewsArticle<'_> {
    pub fn blocks(&self) -> Vec<ContentBlock> {
        format_content(&self.content)
    }
}

/// News entries fetched from the content store, newest first.
pub struct NewsFeed {
    source: Arc<dyn ContentSource>,
    entries: Vec<NewsEntry>,
}

impl NewsFeed {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self {
            source,
            entries: Vec::new(),
        }
    }

    /// Fetches the entries. On failure the previous entries are kept.
    pub async fn load(&mut self) -> Result<usize> {
        match self.source.fetch_news().await {
            Ok(mut entries) => {
                sort_latest_first(&mut entries);
                self.entries = entries;
                tracing::info!("Loaded {} news entries", self.entries.len());
                Ok(self.entries.len())
            }
            Err(e) => {
                tracing::error!("Failed to load news: {}", e);
                Err(e)
            }
        }
    }

    pub fn entries(&self) -> &[NewsEntry] {
        &self.entries
    }

    pub fn articles(&self) -> Vec<NewsArticle<'_>> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| article(entry, index == 0))
            .collect()
    }

    pub fn article(&self, id: &str) -> Result<NewsArticle<'_>> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .map(|index| article(&self.entries[index], index == 0))
            .ok_or_else(|| DemplarError::not_found("news", id))
    }
}

pub(crate) fn article(entry: &NewsEntry, is_latest: bool) -> NewsArticle<'_> {
    let content = entry.content();
    NewsArticle {
        entry,
        is_latest,
        preview: preview(&content),
        reading_time_minutes: reading_time_minutes(&content),
        content,
    }
}
