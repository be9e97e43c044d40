pub mod config_service;
pub mod content;
pub mod dto;
pub mod kv_store;
pub mod paths;
pub mod snapshot_repository;
pub mod storage;

pub use config_service::ConfigService;
pub use content::{HttpContentSource, SnapshotContentSource, content_source_from_config};
pub use kv_store::{FileKeyValueStore, MemoryKeyValueStore};
pub use paths::DemplarPaths;
pub use snapshot_repository::FileSnapshotRepository;
