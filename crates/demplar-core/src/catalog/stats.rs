//! Derived statistics over the character collection.
//!
//! Only eligible (player) characters are counted. Averages round half away
//! from zero, which for non-negative levels matches rounding half up.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::character::{Character, FactionTheme, NPC_FACTION};

/// Iterates over the characters counted by statistics.
pub fn eligible(characters: &[Character]) -> impl Iterator<Item = &Character> {
    characters.iter().filter(|c| c.is_eligible())
}

fn rounded_average(total_level: u64, count: usize) -> Option<u32> {
    if count == 0 {
        return None;
    }
    Some((total_level as f64 / count as f64).round() as u32)
}

/// Overall database statistics.
///
/// `average_level` and `max_level` are `None` when no character is eligible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseStats {
    pub total: usize,
    pub average_level: Option<u32>,
    pub max_level: Option<u32>,
    pub with_images: usize,
}

impl DatabaseStats {
    pub fn compute(characters: &[Character]) -> Self {
        let mut total = 0usize;
        let mut level_sum = 0u64;
        let mut max_level: Option<u32> = None;
        let mut with_images = 0usize;

        for c in eligible(characters) {
            total += 1;
            level_sum += u64::from(c.level);
            max_level = Some(max_level.map_or(c.level, |m| m.max(c.level)));
            if c.profile_url.is_some() {
                with_images += 1;
            }
        }

        Self {
            total,
            average_level: rounded_average(level_sum, total),
            max_level,
            with_images,
        }
    }
}

/// Statistics for one faction group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactionBreakdown<'a> {
    pub faction: String,
    pub count: usize,
    pub average_level: u32,
    /// Highest-level member; the first one encountered wins ties.
    pub top: &'a Character,
}

impl FactionBreakdown<'_> {
    pub fn theme(&self) -> FactionTheme {
        FactionTheme::from_name(&self.faction)
    }
}

struct Group<'a> {
    count: usize,
    level_sum: u64,
    top: &'a Character,
}

/// Groups eligible, non-NPC characters by faction name.
///
/// Groups are listed Demplar, Pond, Pork, Undecided first, then any other
/// faction names alphabetically.
pub fn faction_breakdown(characters: &[Character]) -> Vec<FactionBreakdown<'_>> {
    let mut groups: BTreeMap<&str, Group<'_>> = BTreeMap::new();

    for c in eligible(characters).filter(|c| c.display_faction() != NPC_FACTION) {
        let name = c.faction.name();
        match groups.get_mut(name) {
            Some(group) => {
                group.count += 1;
                group.level_sum += u64::from(c.level);
                if c.level > group.top.level {
                    group.top = c;
                }
            }
            None => {
                groups.insert(
                    name,
                    Group {
                        count: 1,
                        level_sum: u64::from(c.level),
                        top: c,
                    },
                );
            }
        }
    }

    let mut ordered: Vec<&str> = FactionTheme::BREAKDOWN_ORDER
        .iter()
        .map(|theme| match theme {
            FactionTheme::Demplar => "Demplar",
            FactionTheme::Pond => "Pond",
            FactionTheme::Pork => "Pork",
            FactionTheme::Npc => NPC_FACTION,
            FactionTheme::Undecided => "Undecided",
        })
        .filter(|name| groups.contains_key(name))
        .collect();
    let rest: Vec<&str> = groups
        .keys()
        .filter(|name| !ordered.contains(name))
        .copied()
        .collect();
    ordered.extend(rest);

    ordered
        .into_iter()
        .filter_map(|name| {
            groups.get(name).map(|group| FactionBreakdown {
                faction: name.to_string(),
                count: group.count,
                average_level: rounded_average(group.level_sum, group.count).unwrap_or_default(),
                top: group.top,
            })
        })
        .collect()
}

/// 1-based rank among eligible characters: one plus the number of eligible
/// characters with a strictly greater level.
pub fn overall_rank(characters: &[Character], character: &Character) -> usize {
    eligible(characters)
        .filter(|c| c.level > character.level)
        .count()
        + 1
}

/// Same rule as [`overall_rank`], scoped to members of the same faction.
pub fn faction_rank(characters: &[Character], character: &Character) -> usize {
    let faction = character.faction.name();
    eligible(characters)
        .filter(|c| c.faction.name() == faction && c.level > character.level)
        .count()
        + 1
}

/// Everything the profile and comparison views show for one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterStanding {
    pub power: u32,
    pub base_power: u32,
    pub experience_bonus: u32,
    pub lore: u32,
    pub rank: usize,
    pub faction_rank: usize,
    /// Size of the eligible population the rank is taken from.
    pub out_of: usize,
}

impl CharacterStanding {
    pub fn compute(characters: &[Character], character: &Character) -> Self {
        Self {
            power: character.power(),
            base_power: character.base_power(),
            experience_bonus: character.experience_bonus(),
            lore: character.lore(),
            rank: overall_rank(characters, character),
            faction_rank: faction_rank(characters, character),
            out_of: eligible(characters).count(),
        }
    }
}
