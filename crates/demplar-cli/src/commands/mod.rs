//! Subcommand implementations.

pub mod catalog;
pub mod config;
pub mod feedback;
pub mod news;
pub mod shell;

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use demplar_application::{CatalogSession, NewsFeed};
use demplar_core::DemplarError;
use demplar_core::config::DemplarConfig;
use demplar_core::content::ContentSource;
use demplar_infrastructure::{
    ConfigService, DemplarPaths, FileKeyValueStore, content_source_from_config,
};

/// Configuration and collaborators shared by every subcommand.
pub struct AppContext {
    pub config_service: ConfigService,
    pub config: DemplarConfig,
}

impl AppContext {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let config_service = match config_path {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new(),
        };
        let config = config_service
            .get_config()
            .context("Failed to load configuration")?;
        Ok(Self {
            config_service,
            config,
        })
    }

    fn content_source(&self) -> Result<Arc<dyn ContentSource>> {
        content_source_from_config(&self.config).context("Failed to set up content source")
    }

    /// A session with favorites read from local storage; the collection is
    /// not loaded yet.
    pub fn session(&self) -> Result<CatalogSession> {
        let paths = DemplarPaths::new(self.config.storage.data_dir.clone());
        let storage = FileKeyValueStore::new(&paths).context("Failed to open local storage")?;
        Ok(CatalogSession::new(self.content_source()?, Arc::new(storage)))
    }

    /// A session with the collection fetched. A failed fetch leaves the
    /// collection empty; the failure is reported but not returned.
    pub async fn loaded_session(&self) -> Result<CatalogSession> {
        let mut session = self.session()?;
        if let Err(e) = session.load().await {
            unavailable("characters", &e);
        }
        Ok(session)
    }

    pub fn news_feed(&self) -> Result<NewsFeed> {
        Ok(NewsFeed::new(self.content_source()?))
    }

    /// The news feed with entries fetched, empty when the fetch fails.
    pub async fn loaded_news_feed(&self) -> Result<NewsFeed> {
        let mut feed = self.news_feed()?;
        if let Err(e) = feed.load().await {
            unavailable("news", &e);
        }
        Ok(feed)
    }
}

fn unavailable(what: &str, error: &DemplarError) {
    eprintln!(
        "{}",
        format!("Could not load {what} ({error}); showing an empty list.").yellow()
    );
}
