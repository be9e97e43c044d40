//! Character domain models.

use serde::{Deserialize, Serialize};

use super::faction::FactionTheme;

/// Faction name shown for characters without an allegiance.
pub const UNDECIDED_FACTION: &str = "Undecided";
/// Faction name shown for non-player characters.
pub const NPC_FACTION: &str = "NPC";
/// Class name used when a record carries none.
pub const DEFAULT_CLASS_NAME: &str = "Undecided";
/// Identifier of the default location entity.
pub const DEFAULT_LOCATION_ID: &str = "f00bd95c-8d32-40c3-96ba-4e4e3a1bb9c9";
/// Name of the default location entity.
pub const DEFAULT_LOCATION_NAME: &str = "Kingdom";
/// Upper bound of the derived power value.
pub const MAX_POWER: u32 = 1000;
/// Lore is constant for every character.
pub const LORE_VALUE: u32 = 100;
/// Cap of the level-earned share of power.
pub const MAX_BASE_POWER: u32 = 800;
/// Cap of the experience share of power.
pub const MAX_EXPERIENCE_BONUS: u32 = 200;

/// A reference to a named entity in the content store (location, skill, talent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: String,
    pub name: String,
}

impl NamedRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The location assigned to characters whose record has none.
    pub fn default_location() -> Self {
        Self::new(DEFAULT_LOCATION_ID, DEFAULT_LOCATION_NAME)
    }
}

/// A character's allegiance.
///
/// Absence of a faction is resolved once, when records are loaded, into
/// `Undecided` so consumers never check for a missing value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Faction {
    Known { id: String, name: String },
    #[default]
    Undecided,
}

impl Faction {
    pub fn known(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Known {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The faction name, `"Undecided"` for the default.
    pub fn name(&self) -> &str {
        match self {
            Self::Known { name, .. } => name,
            Self::Undecided => UNDECIDED_FACTION,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Known { id, .. } => Some(id),
            Self::Undecided => None,
        }
    }

    pub fn is_undecided(&self) -> bool {
        matches!(self, Self::Undecided)
    }

    pub fn theme(&self) -> FactionTheme {
        FactionTheme::from_name(self.name())
    }
}

/// Whether a character is a player character or a lore placeholder.
///
/// Non-player characters are shown with the "NPC" faction and are excluded
/// from every statistic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Standing {
    #[default]
    Player,
    Npc,
}

/// A character record as held by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Unique within a collection snapshot.
    pub id: String,
    pub name: String,
    pub level: u32,
    pub class_name: String,
    #[serde(default)]
    pub faction: Faction,
    pub location: NamedRef,
    #[serde(default)]
    pub buffs: Vec<String>,
    #[serde(default)]
    pub skills: Vec<NamedRef>,
    #[serde(default)]
    pub talents: Vec<NamedRef>,
    /// Image asset reference in the content store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_handle: Option<String>,
    /// External referral code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
    #[serde(default)]
    pub standing: Standing,
}

impl Character {
    /// Creates an undecided player character with default class and location.
    pub fn new(id: impl Into<String>, name: impl Into<String>, level: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level,
            class_name: DEFAULT_CLASS_NAME.to_string(),
            faction: Faction::Undecided,
            location: NamedRef::default_location(),
            buffs: Vec::new(),
            skills: Vec::new(),
            talents: Vec::new(),
            card_image: None,
            profile_url: None,
            twitter_handle: None,
            referral_code: None,
            standing: Standing::Player,
        }
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn with_faction(mut self, faction: Faction) -> Self {
        self.faction = faction;
        self
    }

    pub fn with_standing(mut self, standing: Standing) -> Self {
        self.standing = standing;
        self
    }

    /// Derived power: ten per level, capped at [`MAX_POWER`].
    pub fn power(&self) -> u32 {
        self.level.saturating_mul(10).min(MAX_POWER)
    }

    /// Part of [`power`](Self::power) earned from level: eight per level,
    /// capped at 800.
    pub fn base_power(&self) -> u32 {
        self.level.saturating_mul(8).min(MAX_BASE_POWER)
    }

    /// Part of [`power`](Self::power) shown as experience: two per level,
    /// capped at 200.
    pub fn experience_bonus(&self) -> u32 {
        self.level.saturating_mul(2).min(MAX_EXPERIENCE_BONUS)
    }

    pub fn lore(&self) -> u32 {
        LORE_VALUE
    }

    /// True for characters counted by statistics and rankings.
    pub fn is_eligible(&self) -> bool {
        self.standing == Standing::Player
    }

    /// Faction name as shown to users; non-player characters read "NPC".
    pub fn display_faction(&self) -> &str {
        match self.standing {
            Standing::Npc => NPC_FACTION,
            Standing::Player => self.faction.name(),
        }
    }

    pub fn theme(&self) -> FactionTheme {
        FactionTheme::from_name(self.display_faction())
    }

    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// Turns a display name into a URL-friendly slug.
///
/// Brackets are dropped, anything outside `[a-z0-9 -]` is removed, and runs
/// of whitespace or hyphens collapse into a single hyphen.
pub fn slugify(name: &str) -> String {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    let mut slug = String::with_capacity(cleaned.len());
    let mut pending_dash = false;
    for c in cleaned.trim().chars() {
        if c.is_whitespace() || c == '-' {
            pending_dash = true;
            continue;
        }
        if pending_dash {
            slug.push('-');
            pending_dash = false;
        }
        slug.push(c);
    }
    // The input is trimmed, so a trailing separator can only be a hyphen.
    if pending_dash {
        slug.push('-');
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_is_capped() {
        assert_eq!(Character::new("1", "Low", 7).power(), 70);
        assert_eq!(Character::new("2", "Cap", 100).power(), 1000);
        assert_eq!(Character::new("3", "Over", 250).power(), 1000);
        assert_eq!(Character::new("4", "Lore", 1).lore(), 100);
    }

    #[test]
    fn test_power_breakdown() {
        let low = Character::new("1", "Low", 7);
        assert_eq!(low.base_power(), 56);
        assert_eq!(low.experience_bonus(), 14);

        let over = Character::new("2", "Over", 150);
        assert_eq!(over.base_power(), 800);
        assert_eq!(over.experience_bonus(), 200);
        assert_eq!(over.base_power() + over.experience_bonus(), over.power());
    }

    #[test]
    fn test_undecided_faction_name() {
        let c = Character::new("1", "Nobody", 3);
        assert!(c.faction.is_undecided());
        assert_eq!(c.display_faction(), "Undecided");
        assert_eq!(c.faction.id(), None);
    }

    #[test]
    fn test_npc_standing_overrides_faction() {
        let c = Character::new("69", "The Watcher", 99)
            .with_faction(Faction::known("f1", "Demplar"))
            .with_standing(Standing::Npc);
        assert_eq!(c.display_faction(), "NPC");
        assert_eq!(c.faction.name(), "Demplar");
        assert!(!c.is_eligible());
        assert_eq!(c.theme(), FactionTheme::Npc);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Sir Reginald"), "sir-reginald");
        assert_eq!(slugify("[GM] Shadow  Mera"), "gm-shadow-mera");
        assert_eq!(slugify("Bob's -- Character!"), "bobs-character");
        assert_eq!(slugify("  spaced  "), "spaced");
        assert_eq!(slugify("edge-"), "edge-");
    }

    #[test]
    fn test_serde_defaults_for_optional_fields() {
        let json = r#"{
            "id": "7",
            "name": "Aria",
            "level": 12,
            "className": "Ranger",
            "location": {"id": "loc", "name": "Tavern"}
        }"#;
        let c: Character = serde_json::from_str(json).unwrap();
        assert!(c.faction.is_undecided());
        assert_eq!(c.standing, Standing::Player);
        assert!(c.buffs.is_empty());
        assert!(c.profile_url.is_none());
    }
}
