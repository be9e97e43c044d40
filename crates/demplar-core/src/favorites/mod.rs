//! Favorite characters, persisted across sessions.

mod repository;
mod store;

pub use repository::KeyValueStore;
pub use store::{FAVORITES_KEY, FavoritesStore};
