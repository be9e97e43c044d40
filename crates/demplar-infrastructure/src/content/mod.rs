//! `ContentSource` implementations.

mod http;
mod queries;
mod snapshot_source;

pub use http::HttpContentSource;
pub use queries::{CHARACTERS_QUERY, NEWS_QUERY};
pub use snapshot_source::SnapshotContentSource;

use std::sync::Arc;

use demplar_core::Result;
use demplar_core::config::DemplarConfig;
use demplar_core::content::ContentSource;

/// Picks the content source the configuration asks for: the snapshot file
/// when one is set, otherwise the remote content store.
pub fn content_source_from_config(config: &DemplarConfig) -> Result<Arc<dyn ContentSource>> {
    match &config.content.snapshot {
        Some(path) => {
            tracing::debug!("Reading characters from snapshot {}", path.display());
            Ok(Arc::new(SnapshotContentSource::new(path.clone())))
        }
        None => Ok(Arc::new(HttpContentSource::new(
            &config.content,
            &config.catalog,
        )?)),
    }
}
