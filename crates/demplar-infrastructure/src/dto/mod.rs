//! Data transfer objects.
//!
//! `character` and `news` mirror the records returned by the content store
//! query API. `snapshot` holds the versioned export schema.

pub mod character;
pub mod news;
pub mod snapshot;

pub use character::{CharacterRecord, RecordMapper, RefRecord};
pub use news::NewsRecord;
pub use snapshot::{CatalogSnapshotV1_0_0, SnapshotCharacterV1_0_0, create_snapshot_migrator};
