//! Side-by-side comparison selection.

use serde::Serialize;

use super::stats::overall_rank;
use crate::character::Character;

/// Maximum number of characters held for comparison.
pub const MAX_COMPARE: usize = 3;

/// Result of toggling a character in the comparison selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareOutcome {
    Added { name: String },
    Removed { name: String },
    /// The selection was full; nothing changed.
    Rejected,
}

impl CompareOutcome {
    /// The notice shown to the user for this outcome.
    pub fn notice(&self) -> String {
        match self {
            CompareOutcome::Added { name } => format!("Added {name} to comparison ⚖️"),
            CompareOutcome::Removed { name } => format!("Removed {name} from comparison 📊"),
            CompareOutcome::Rejected => {
                format!("Maximum {MAX_COMPARE} characters for comparison! 🚫")
            }
        }
    }

    pub fn changed(&self) -> bool {
        !matches!(self, CompareOutcome::Rejected)
    }
}

/// Ordered, capped list of characters chosen for comparison.
///
/// Lives only as long as its owner; nothing here is persisted.
#[derive(Debug, Clone, Default)]
pub struct CompareSelection {
    selected: Vec<Character>,
}

impl CompareSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the character if present (by id), appends it if there is
    /// room, otherwise leaves the selection unchanged.
    pub fn toggle(&mut self, character: &Character) -> CompareOutcome {
        if let Some(pos) = self.selected.iter().position(|c| c.id == character.id) {
            let removed = self.selected.remove(pos);
            return CompareOutcome::Removed { name: removed.name };
        }
        if self.selected.len() >= MAX_COMPARE {
            return CompareOutcome::Rejected;
        }
        self.selected.push(character.clone());
        CompareOutcome::Added {
            name: character.name.clone(),
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Replaces the held copy of `character` after it was edited elsewhere.
    pub fn refresh(&mut self, character: &Character) {
        if let Some(held) = self.selected.iter_mut().find(|c| c.id == character.id) {
            *held = character.clone();
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.iter().any(|c| c.id == id)
    }

    pub fn characters(&self) -> &[Character] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Rows of the quick comparison table; empty until two are selected.
    ///
    /// Ranks are taken against `collection`, the full character list.
    pub fn table(&self, collection: &[Character]) -> Vec<ComparisonRow> {
        if self.selected.len() < 2 {
            return Vec::new();
        }
        self.selected
            .iter()
            .map(|c| ComparisonRow {
                id: c.id.clone(),
                name: c.name.clone(),
                level: c.level,
                faction: c.display_faction().to_string(),
                power: c.power(),
                lore: c.lore(),
                rank: overall_rank(collection, c),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub faction: String,
    pub power: u32,
    pub lore: u32,
    pub rank: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars() -> Vec<Character> {
        (1..=4)
            .map(|i| Character::new(i.to_string(), format!("Hero{i}"), i * 10))
            .collect()
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let c = chars();
        let mut selection = CompareSelection::new();

        let added = selection.toggle(&c[0]);
        assert_eq!(added.notice(), "Added Hero1 to comparison ⚖️");
        assert!(selection.contains("1"));

        let removed = selection.toggle(&c[0]);
        assert_eq!(removed.notice(), "Removed Hero1 from comparison 📊");
        assert!(selection.is_empty());
    }

    #[test]
    fn test_fourth_character_is_rejected() {
        let c = chars();
        let mut selection = CompareSelection::new();
        for ch in &c[..3] {
            assert!(selection.toggle(ch).changed());
        }

        let outcome = selection.toggle(&c[3]);
        assert_eq!(outcome, CompareOutcome::Rejected);
        assert_eq!(outcome.notice(), "Maximum 3 characters for comparison! 🚫");
        assert_eq!(selection.len(), 3);
        assert!(!selection.contains("4"));

        // Removing still works while full.
        selection.toggle(&c[1]);
        assert_eq!(selection.len(), 2);
        assert!(selection.toggle(&c[3]).changed());
        let ids: Vec<&str> = selection.characters().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "4"]);
    }

    #[test]
    fn test_clear() {
        let c = chars();
        let mut selection = CompareSelection::new();
        selection.toggle(&c[0]);
        selection.toggle(&c[1]);
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_refresh_updates_held_copy() {
        let c = chars();
        let mut selection = CompareSelection::new();
        selection.toggle(&c[0]);

        let mut edited = c[0].clone();
        edited.name = "Renamed".to_string();
        selection.refresh(&edited);
        selection.refresh(&c[2]);

        assert_eq!(selection.len(), 1);
        assert_eq!(selection.characters()[0].name, "Renamed");
    }

    #[test]
    fn test_table_requires_two() {
        let c = chars();
        let mut selection = CompareSelection::new();
        selection.toggle(&c[0]);
        assert!(selection.table(&c).is_empty());

        selection.toggle(&c[3]);
        let rows = selection.table(&c);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rank, 4);
        assert_eq!(rows[1].rank, 1);
        assert_eq!(rows[1].power, 400);
        assert_eq!(rows[1].faction, "Undecided");
    }
}
