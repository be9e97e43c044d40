//! Faction color schemes.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The closed set of visual schemes a faction can drive.
///
/// Unknown faction names fall back to the NPC scheme.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum FactionTheme {
    Demplar,
    Pond,
    Pork,
    #[strum(serialize = "NPC")]
    #[serde(rename = "NPC")]
    Npc,
    Undecided,
}

impl FactionTheme {
    /// Order in which faction groups are listed in breakdowns.
    pub const BREAKDOWN_ORDER: [FactionTheme; 4] = [
        FactionTheme::Demplar,
        FactionTheme::Pond,
        FactionTheme::Pork,
        FactionTheme::Undecided,
    ];

    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(FactionTheme::Npc)
    }

    pub fn icon(&self) -> &'static str {
        match self {
            FactionTheme::Demplar => "⚔️",
            FactionTheme::Pond => "🌊",
            FactionTheme::Pork => "🐷",
            FactionTheme::Npc => "📜",
            FactionTheme::Undecided => "❓",
        }
    }

    /// Accent color name, used by front ends to pick a palette entry.
    pub fn accent(&self) -> &'static str {
        match self {
            FactionTheme::Demplar => "red",
            FactionTheme::Pond => "green",
            FactionTheme::Pork => "pink",
            FactionTheme::Npc => "gray",
            FactionTheme::Undecided => "purple",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_from_name() {
        assert_eq!(FactionTheme::from_name("Demplar"), FactionTheme::Demplar);
        assert_eq!(FactionTheme::from_name("NPC"), FactionTheme::Npc);
        assert_eq!(FactionTheme::from_name("Undecided"), FactionTheme::Undecided);
        assert_eq!(FactionTheme::from_name("Goblins"), FactionTheme::Npc);
    }

    #[test]
    fn test_display_round_trips_names() {
        for theme in FactionTheme::iter() {
            assert_eq!(FactionTheme::from_name(&theme.to_string()), theme);
        }
        assert_eq!(FactionTheme::Npc.to_string(), "NPC");
    }
}
