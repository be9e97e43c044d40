//! Durable key-value storage trait.

use crate::error::Result;

/// Synchronous string storage keyed by name.
///
/// Implementations must be safe to share across threads; the favorites
/// store holds one behind an `Arc`.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
