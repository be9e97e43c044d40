//! Character filtering and ordering.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::str::FromStr;

use icu_collator::{Collator, CollatorOptions};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::character::Character;

/// Level range selector for the character list.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum LevelBucket {
    #[default]
    #[strum(serialize = "all")]
    #[serde(rename = "all")]
    All,
    #[strum(serialize = "1-10")]
    #[serde(rename = "1-10")]
    OneToTen,
    #[strum(serialize = "11-20")]
    #[serde(rename = "11-20")]
    ElevenToTwenty,
    #[strum(serialize = "21-30")]
    #[serde(rename = "21-30")]
    TwentyOneToThirty,
    #[strum(serialize = "31-40")]
    #[serde(rename = "31-40")]
    ThirtyOneToForty,
    #[strum(serialize = "41-50")]
    #[serde(rename = "41-50")]
    FortyOneToFifty,
    #[strum(serialize = "50+")]
    #[serde(rename = "50+")]
    AboveFifty,
}

impl LevelBucket {
    /// Inclusive bounds; `None` for the bucket that accepts every level.
    pub fn bounds(&self) -> Option<(u32, u32)> {
        match self {
            LevelBucket::All => None,
            LevelBucket::OneToTen => Some((1, 10)),
            LevelBucket::ElevenToTwenty => Some((11, 20)),
            LevelBucket::TwentyOneToThirty => Some((21, 30)),
            LevelBucket::ThirtyOneToForty => Some((31, 40)),
            LevelBucket::FortyOneToFifty => Some((41, 50)),
            LevelBucket::AboveFifty => Some((51, u32::MAX)),
        }
    }

    pub fn contains(&self, level: u32) -> bool {
        match self.bounds() {
            None => true,
            Some((low, high)) => level >= low && level <= high,
        }
    }
}

/// Faction selector for the character list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactionFilter {
    #[default]
    All,
    Named(String),
}

impl FactionFilter {
    pub fn matches(&self, character: &Character) -> bool {
        match self {
            FactionFilter::All => true,
            FactionFilter::Named(name) => character.faction.name() == name,
        }
    }
}

impl From<&str> for FactionFilter {
    fn from(s: &str) -> Self {
        if s == "all" {
            FactionFilter::All
        } else {
            FactionFilter::Named(s.to_string())
        }
    }
}

impl FromStr for FactionFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

/// The three user inputs narrowing the character list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterQuery {
    /// Free text matched against name and class name.
    pub text: String,
    pub level: LevelBucket,
    pub faction: FactionFilter,
}

impl CharacterQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_level(mut self, level: LevelBucket) -> Self {
        self.level = level;
        self
    }

    pub fn with_faction(mut self, faction: impl Into<FactionFilter>) -> Self {
        self.faction = faction.into();
        self
    }

    fn matches_text(&self, character: &Character) -> bool {
        if self.text.is_empty() {
            return true;
        }
        let needle = self.text.to_lowercase();
        character.name.to_lowercase().contains(&needle)
            || character.class_name.to_lowercase().contains(&needle)
    }

    /// True iff the text, level and faction predicates all hold.
    pub fn matches(&self, character: &Character) -> bool {
        self.matches_text(character)
            && self.level.contains(character.level)
            && self.faction.matches(character)
    }
}

thread_local! {
    static NAME_COLLATOR: Option<Collator> =
        match Collator::try_new(&Default::default(), CollatorOptions::new()) {
            Ok(collator) => Some(collator),
            Err(e) => {
                tracing::warn!("Name collator unavailable, using case-folded order: {:?}", e);
                None
            }
        };
}

/// Locale-aware name ordering (root collation, tertiary strength).
///
/// Accents and case only break ties between otherwise equal letters, and
/// lowercase sorts before uppercase. Code points settle names the collator
/// considers equal.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    NAME_COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        })
        .then_with(|| a.cmp(b))
}

/// Listing order: favorites first, then level descending, then name ascending.
pub fn compare_for_listing(
    a: &Character,
    b: &Character,
    favorites: &HashSet<String>,
) -> Ordering {
    let a_fav = favorites.contains(&a.id);
    let b_fav = favorites.contains(&b.id);
    b_fav
        .cmp(&a_fav)
        .then_with(|| b.level.cmp(&a.level))
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Narrows `characters` to the ones matching `query`, in listing order.
///
/// Pure function of its inputs; `favorites` is a snapshot of the favorite set.
pub fn filter_characters<'a>(
    characters: &'a [Character],
    query: &CharacterQuery,
    favorites: &HashSet<String>,
) -> Vec<&'a Character> {
    let mut matched: Vec<&Character> = characters.iter().filter(|c| query.matches(c)).collect();
    matched.sort_by(|a, b| compare_for_listing(a, b, favorites));
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Faction;

    fn ids(list: &[&Character]) -> Vec<String> {
        list.iter().map(|c| c.id.clone()).collect()
    }

    fn sample() -> Vec<Character> {
        vec![
            Character::new("1", "Aldric", 12)
                .with_class("Knight")
                .with_faction(Faction::known("f-d", "Demplar")),
            Character::new("2", "Brina", 45)
                .with_class("Mage")
                .with_faction(Faction::known("f-p", "Pond")),
            Character::new("3", "corvin", 45)
                .with_class("Rogue")
                .with_faction(Faction::known("f-d", "Demplar")),
            Character::new("4", "Dagna", 60).with_class("Archmage"),
            Character::new("5", "Eryn", 3)
                .with_class("Squire")
                .with_faction(Faction::known("f-k", "Pork")),
            Character::new("6", "Fenn", 0),
        ]
    }

    #[test]
    fn test_basic_scenario_level_descending() {
        let chars = vec![Character::new("1", "B", 10), Character::new("2", "A", 20)];
        let out = filter_characters(&chars, &CharacterQuery::new(), &HashSet::new());
        assert_eq!(ids(&out), vec!["2", "1"]);
    }

    #[test]
    fn test_text_query_is_case_insensitive() {
        let chars = vec![Character::new("1", "B", 10), Character::new("2", "A", 20)];
        let query = CharacterQuery::new().with_text("a");
        let out = filter_characters(&chars, &query, &HashSet::new());
        assert_eq!(ids(&out), vec!["2"]);
    }

    #[test]
    fn test_text_matches_class_name() {
        let chars = sample();
        let query = CharacterQuery::new().with_text("MAGE");
        let out = filter_characters(&chars, &query, &HashSet::new());
        assert_eq!(ids(&out), vec!["4", "2"]);
    }

    #[test]
    fn test_level_buckets() {
        assert!(LevelBucket::OneToTen.contains(1));
        assert!(LevelBucket::OneToTen.contains(10));
        assert!(!LevelBucket::OneToTen.contains(0));
        assert!(!LevelBucket::FortyOneToFifty.contains(51));
        assert!(LevelBucket::AboveFifty.contains(51));
        assert!(LevelBucket::AboveFifty.contains(u32::MAX));
        assert!(!LevelBucket::AboveFifty.contains(50));
        assert!(LevelBucket::All.contains(0));
    }

    #[test]
    fn test_level_bucket_parsing() {
        assert_eq!("all".parse::<LevelBucket>().unwrap(), LevelBucket::All);
        assert_eq!("50+".parse::<LevelBucket>().unwrap(), LevelBucket::AboveFifty);
        assert_eq!("21-30".parse::<LevelBucket>().unwrap(), LevelBucket::TwentyOneToThirty);
        assert!("51-60".parse::<LevelBucket>().is_err());
        assert_eq!(LevelBucket::ElevenToTwenty.to_string(), "11-20");
    }

    #[test]
    fn test_faction_filter() {
        let chars = sample();
        let query = CharacterQuery::new().with_faction("Demplar");
        let out = filter_characters(&chars, &query, &HashSet::new());
        assert_eq!(ids(&out), vec!["3", "1"]);

        let undecided = CharacterQuery::new().with_faction("Undecided");
        let out = filter_characters(&chars, &undecided, &HashSet::new());
        assert_eq!(ids(&out), vec!["4", "6"]);
    }

    #[test]
    fn test_filter_is_sound_and_complete() {
        let chars = sample();
        let favorites: HashSet<String> = ["5".to_string()].into_iter().collect();
        let queries = [
            CharacterQuery::new(),
            CharacterQuery::new().with_text("r"),
            CharacterQuery::new().with_level(LevelBucket::FortyOneToFifty),
            CharacterQuery::new().with_text("a").with_faction("Demplar"),
            CharacterQuery::new()
                .with_level(LevelBucket::OneToTen)
                .with_faction("Pork"),
        ];

        for query in &queries {
            let out = filter_characters(&chars, query, &favorites);
            assert!(out.iter().all(|c| query.matches(c)));
            let expected = chars.iter().filter(|c| query.matches(c)).count();
            assert_eq!(out.len(), expected);
        }
    }

    #[test]
    fn test_sorting_is_idempotent() {
        let chars = sample();
        let favorites: HashSet<String> = ["1".to_string()].into_iter().collect();
        let once = filter_characters(&chars, &CharacterQuery::new(), &favorites);
        let mut twice = once.clone();
        twice.sort_by(|a, b| compare_for_listing(a, b, &favorites));
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_favorite_wins_equal_level_regardless_of_name() {
        let chars = sample();
        let favorites: HashSet<String> = ["3".to_string()].into_iter().collect();
        let query = CharacterQuery::new().with_level(LevelBucket::FortyOneToFifty);

        let plain = filter_characters(&chars, &query, &HashSet::new());
        assert_eq!(ids(&plain), vec!["2", "3"]);

        let with_fav = filter_characters(&chars, &query, &favorites);
        assert_eq!(ids(&with_fav), vec!["3", "2"]);
    }

    #[test]
    fn test_favorite_outranks_level() {
        let chars = sample();
        let favorites: HashSet<String> = ["5".to_string()].into_iter().collect();
        let out = filter_characters(&chars, &CharacterQuery::new(), &favorites);
        assert_eq!(out[0].id, "5");
        assert_eq!(out[1].id, "4");
    }

    #[test]
    fn test_compare_names_follows_collation_order() {
        assert_eq!(compare_names("brina", "Corvin"), Ordering::Less);
        assert_eq!(compare_names("alpha", "Alpha"), Ordering::Less);
        assert_eq!(compare_names("Émile", "Zed"), Ordering::Less);
        assert_eq!(compare_names("Emile", "Émile"), Ordering::Less);
        assert_eq!(compare_names("Émile", "Erik"), Ordering::Less);
        assert_eq!(compare_names("Aldric", "Aldric"), Ordering::Equal);
    }

    #[test]
    fn test_accented_names_sort_among_ascii_names() {
        let chars = vec![
            Character::new("1", "Zed", 10),
            Character::new("2", "Émile", 10),
            Character::new("3", "Dagna", 10),
        ];
        let out = filter_characters(&chars, &CharacterQuery::new(), &HashSet::new());
        assert_eq!(ids(&out), vec!["3", "2", "1"]);
    }
}
