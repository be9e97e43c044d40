//! Catalog session use case.
//!
//! `CatalogSession` is the state container for one browsing session: the
//! fetched collection, the favorites, the comparison selection and the
//! currently selected character. It owns no globals; dropping it ends the
//! session.

use std::sync::Arc;

use demplar_core::catalog::{
    CharacterQuery, CharacterStanding, CompareOutcome, CompareSelection, ComparisonRow,
    DatabaseStats, FactionBreakdown, faction_breakdown, filter_characters,
};
use demplar_core::character::Character;
use demplar_core::content::ContentSource;
use demplar_core::favorites::{FavoritesStore, KeyValueStore};
use demplar_core::{DemplarError, Result};

/// Everything the profile view shows for one character.
#[derive(Debug, Clone)]
pub struct CharacterProfile<'a> {
    pub character: &'a Character,
    pub standing: CharacterStanding,
    pub is_favorite: bool,
    pub in_comparison: bool,
}

pub struct CatalogSession {
    source: Arc<dyn ContentSource>,
    characters: Vec<Character>,
    favorites: FavoritesStore,
    comparison: CompareSelection,
    selected: Option<String>,
    query: CharacterQuery,
}

impl CatalogSession {
    /// Creates a session with an empty collection. Favorites are read from
    /// `storage` immediately.
    pub fn new(source: Arc<dyn ContentSource>, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            source,
            characters: Vec::new(),
            favorites: FavoritesStore::load(storage),
            comparison: CompareSelection::new(),
            selected: None,
            query: CharacterQuery::default(),
        }
    }

    /// Fetches the collection and replaces the current one.
    ///
    /// On failure the previous collection stays in place and the error is
    /// returned after being logged.
    pub async fn load(&mut self) -> Result<usize> {
        match self.source.fetch_characters().await {
            Ok(characters) => {
                let count = characters.len();
                self.replace_characters(characters);
                tracing::info!("Loaded {} characters", count);
                Ok(count)
            }
            Err(e) => {
                tracing::error!("Failed to load characters: {}", e);
                Err(e)
            }
        }
    }

    /// Replaces the collection. Selection and comparison entries that no
    /// longer exist are dropped.
    pub fn replace_characters(&mut self, characters: Vec<Character>) {
        self.characters = characters;

        if let Some(id) = &self.selected {
            if !self.characters.iter().any(|c| &c.id == id) {
                self.selected = None;
            }
        }

        let mut comparison = CompareSelection::new();
        for held in self.comparison.characters() {
            if let Some(current) = self.characters.iter().find(|c| c.id == held.id) {
                comparison.toggle(current);
            }
        }
        self.comparison = comparison;
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn find(&self, id: &str) -> Result<&Character> {
        self.characters
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| DemplarError::not_found("character", id))
    }

    // ------------------------------------------------------------------------
    // Browsing
    // ------------------------------------------------------------------------

    pub fn query(&self) -> &CharacterQuery {
        &self.query
    }

    pub fn set_query(&mut self, query: CharacterQuery) {
        self.query = query;
    }

    /// The collection narrowed by the current query, favorites first.
    pub fn visible(&self) -> Vec<&Character> {
        filter_characters(&self.characters, &self.query, &self.favorites.snapshot())
    }

    /// Same ordering as [`visible`](Self::visible) for an ad-hoc query.
    pub fn search(&self, query: &CharacterQuery) -> Vec<&Character> {
        filter_characters(&self.characters, query, &self.favorites.snapshot())
    }

    pub fn select(&mut self, id: &str) -> Result<&Character> {
        let index = self
            .characters
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| DemplarError::not_found("character", id))?;
        self.selected = Some(id.to_string());
        Ok(&self.characters[index])
    }

    pub fn selected(&self) -> Option<&Character> {
        let id = self.selected.as_deref()?;
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn profile(&self, id: &str) -> Result<CharacterProfile<'_>> {
        let character = self.find(id)?;
        Ok(CharacterProfile {
            character,
            standing: CharacterStanding::compute(&self.characters, character),
            is_favorite: self.favorites.is_favorite(id),
            in_comparison: self.comparison.contains(id),
        })
    }

    // ------------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------------

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.is_favorite(id)
    }

    /// Flips the favorite flag; returns whether `id` is now a favorite.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        self.favorites.toggle_favorite(id)
    }

    pub fn remove_favorite(&mut self, id: &str) {
        self.favorites.remove_favorite(id);
    }

    /// Favorites present in the collection, highest level first.
    pub fn favorite_characters(&self) -> Vec<&Character> {
        let mut resolved = self.favorites.resolve(&self.characters);
        resolved.sort_by(|a, b| b.level.cmp(&a.level));
        resolved
    }

    // ------------------------------------------------------------------------
    // Comparison
    // ------------------------------------------------------------------------

    pub fn toggle_compare(&mut self, id: &str) -> Result<CompareOutcome> {
        let character = self
            .characters
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| DemplarError::not_found("character", id))?;
        Ok(self.comparison.toggle(character))
    }

    pub fn clear_compare(&mut self) {
        self.comparison.clear();
    }

    pub fn comparison(&self) -> &[Character] {
        self.comparison.characters()
    }

    pub fn comparison_table(&self) -> Vec<ComparisonRow> {
        self.comparison.table(&self.characters)
    }

    // ------------------------------------------------------------------------
    // Statistics
    // ------------------------------------------------------------------------

    pub fn statistics(&self) -> DatabaseStats {
        DatabaseStats::compute(&self.characters)
    }

    pub fn faction_breakdown(&self) -> Vec<FactionBreakdown<'_>> {
        faction_breakdown(&self.characters)
    }

    // ------------------------------------------------------------------------
    // Edits
    // ------------------------------------------------------------------------

    /// Applies `edit` to the character with `id` and returns the result.
    ///
    /// The comparison copy is refreshed; the selection follows by id.
    pub fn update_character<F>(&mut self, id: &str, edit: F) -> Result<&Character>
    where
        F: FnOnce(&mut Character) -> Result<()>,
    {
        let index = self
            .characters
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| DemplarError::not_found("character", id))?;

        let mut updated = self.characters[index].clone();
        edit(&mut updated)?;
        self.comparison.refresh(&updated);
        self.characters[index] = updated;
        Ok(&self.characters[index])
    }
}
