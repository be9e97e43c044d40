//! Favorites store backed by a [`KeyValueStore`].

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use super::repository::KeyValueStore;
use crate::character::Character;

/// Storage key holding the favorites as a JSON array of identifiers.
pub const FAVORITES_KEY: &str = "demplarFavorites";

/// The set of favorited character identifiers.
///
/// The in-memory set is authoritative for the session. Storage is read once
/// on construction and rewritten after every mutation; storage failures are
/// logged and never surface to callers.
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStore>,
    ids: BTreeSet<String>,
}

impl FavoritesStore {
    /// Loads the favorites from `storage`. Missing, unreadable or corrupt
    /// data yields an empty set.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let ids = match storage.get(FAVORITES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    tracing::warn!("Ignoring corrupted favorites data: {}", e);
                    BTreeSet::new()
                }
            },
            Ok(None) => BTreeSet::new(),
            Err(e) => {
                tracing::warn!("Failed to read favorites, starting empty: {}", e);
                BTreeSet::new()
            }
        };
        tracing::debug!("Loaded {} favorites", ids.len());
        Self { storage, ids }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Flips membership of `id` and returns whether it is now a favorite.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        let now_favorite = if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        };
        self.persist();
        now_favorite
    }

    pub fn remove_favorite(&mut self, id: &str) {
        self.ids.remove(id);
        self.persist();
    }

    /// A copy of the current set, for sorting and annotation.
    pub fn snapshot(&self) -> HashSet<String> {
        self.ids.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Favorites that exist in `collection`, in collection order.
    ///
    /// Stored ids with no matching character are skipped.
    pub fn resolve<'a>(&self, collection: &'a [Character]) -> Vec<&'a Character> {
        collection
            .iter()
            .filter(|c| self.ids.contains(&c.id))
            .collect()
    }

    fn persist(&self) {
        let ids: Vec<&String> = self.ids.iter().collect();
        let raw = match serde_json::to_string(&ids) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("Failed to serialize favorites: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set(FAVORITES_KEY, &raw) {
            tracing::error!("Failed to persist favorites: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DemplarError, Result};
    use std::collections::HashMap;
    use std::sync::RwLock;

    #[derive(Default)]
    struct MapStore {
        values: RwLock<HashMap<String, String>>,
    }

    impl MapStore {
        fn with(key: &str, value: &str) -> Self {
            let store = Self::default();
            store
                .values
                .write()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            store
        }

        fn raw(&self, key: &str) -> Option<String> {
            self.values.read().unwrap().get(key).cloned()
        }
    }

    impl KeyValueStore for MapStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.raw(key))
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.values
                .write()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(DemplarError::io("storage unavailable"))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(DemplarError::io("storage is read-only"))
        }
    }

    #[test]
    fn test_loads_existing_favorites() {
        let storage = Arc::new(MapStore::with(FAVORITES_KEY, r#"["3","7"]"#));
        let store = FavoritesStore::load(storage);
        assert!(store.is_favorite("3"));
        assert!(store.is_favorite("7"));
        assert!(!store.is_favorite("4"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_corrupted_data_yields_empty_set() {
        for raw in ["", "{not json", r#"{"a":1}"#] {
            let storage = Arc::new(MapStore::with(FAVORITES_KEY, raw));
            let store = FavoritesStore::load(storage);
            assert!(store.is_empty());
            assert!(!store.is_favorite("1"));
        }
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let storage = Arc::new(MapStore::default());
        let mut store = FavoritesStore::load(storage.clone());

        assert!(store.toggle_favorite("5"));
        assert!(store.is_favorite("5"));
        assert_eq!(storage.raw(FAVORITES_KEY).as_deref(), Some(r#"["5"]"#));

        assert!(!store.toggle_favorite("5"));
        assert!(!store.is_favorite("5"));
        assert_eq!(storage.raw(FAVORITES_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_mutations_survive_reload() {
        let storage = Arc::new(MapStore::default());
        {
            let mut store = FavoritesStore::load(storage.clone());
            store.toggle_favorite("a");
            store.toggle_favorite("b");
            store.remove_favorite("a");
        }
        let reloaded = FavoritesStore::load(storage);
        assert!(reloaded.is_favorite("b"));
        assert!(!reloaded.is_favorite("a"));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store = FavoritesStore::load(Arc::new(MapStore::default()));
        store.remove_favorite("missing");
        assert!(store.is_empty());
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let mut store = FavoritesStore::load(Arc::new(BrokenStore));
        assert!(store.is_empty());
        assert!(store.toggle_favorite("9"));
        assert!(store.is_favorite("9"));
    }

    #[test]
    fn test_resolve_skips_unknown_ids() {
        let storage = Arc::new(MapStore::with(FAVORITES_KEY, r#"["2","gone"]"#));
        let store = FavoritesStore::load(storage);
        let collection = vec![Character::new("1", "A", 1), Character::new("2", "B", 2)];
        let resolved = store.resolve(&collection);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, "2");
        assert_eq!(store.snapshot().len(), 2);
    }
}
