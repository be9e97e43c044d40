//! In-memory news board.
//!
//! Entries live only as long as the board; nothing is written back to the
//! content store.

use chrono::{DateTime, Utc};

use demplar_core::news::{NewsBody, NewsEntry};
use demplar_core::{DemplarError, Result};

use crate::news_feed::{NewsArticle, article};

pub const BOARD_AUTHOR: &str = "Demplar News Team";

#[derive(Debug, Default)]
pub struct NewsBoard {
    entries: Vec<NewsEntry>,
    next_id: u64,
}

impl NewsBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a new entry at the top of the board.
    ///
    /// Title and content are trimmed and both must be non-empty.
    pub fn publish(&mut self, title: &str, content: &str, at: DateTime<Utc>) -> Result<&NewsEntry> {
        let title = title.trim();
        let content = content.trim();
        if title.is_empty() || content.is_empty() {
            return Err(DemplarError::validation(
                "Please fill in both title and content for the news article!",
            ));
        }

        self.next_id += 1;
        let entry = NewsEntry {
            id: format!("board-{}", self.next_id),
            title: title.to_string(),
            author: Some(BOARD_AUTHOR.to_string()),
            published_at: Some(at),
            body: NewsBody::Plain(content.to_string()),
        };
        tracing::debug!("Published board entry {}", entry.id);
        self.entries.insert(0, entry);
        Ok(&self.entries[0])
    }

    /// Removes the entry with `id`.
    pub fn delete(&mut self, id: &str) -> Result<NewsEntry> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| DemplarError::not_found("news", id))?;
        Ok(self.entries.remove(index))
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

    /// Board entries followed by `fetched`; only the first is marked latest.
    pub fn articles_over<'a>(&'a self, fetched: &'a [NewsEntry]) -> Vec<NewsArticle<'a>> {
        self.entries
            .iter()
            .chain(fetched)
            .enumerate()
            .map(|(index, entry)| article(entry, index == 0))
            .collect()
    }
}
