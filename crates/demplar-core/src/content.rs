//! Content source trait.

use async_trait::async_trait;

use crate::character::Character;
use crate::error::Result;
use crate::news::NewsEntry;

/// Read-only access to the character and news records of the content store.
///
/// Records come back fully resolved: faction, location and class name are
/// already defaulted, and non-player characters carry their standing.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetches every character record.
    async fn fetch_characters(&self) -> Result<Vec<Character>>;

    /// Fetches every news record.
    async fn fetch_news(&self) -> Result<Vec<NewsEntry>>;
}
