//! Character records as returned by the content store.

use serde::Deserialize;
use std::collections::HashSet;

use demplar_core::character::{Character, DEFAULT_CLASS_NAME, Faction, NamedRef, Standing};

/// Identifier the content store assigns to the placeholder "Undecided" faction.
pub const UNDECIDED_FACTION_ID: &str = "311351ad-8f81-4299-912a-287161e5cab1";

/// A dereferenced `{_id, name}` pair.
#[derive(Debug, Clone, Deserialize)]
pub struct RefRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl RefRecord {
    fn into_named(self) -> NamedRef {
        let name = self.name.unwrap_or_default();
        NamedRef::new(self.id, name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref")]
    pub reference: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageRecord {
    #[serde(default)]
    pub asset: Option<AssetRef>,
}

/// One character as projected by the character query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub level: Option<f64>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub faction: Option<RefRecord>,
    #[serde(default)]
    pub location: Option<RefRecord>,
    #[serde(default)]
    pub buffs: Option<Vec<String>>,
    #[serde(default)]
    pub skills: Option<Vec<Option<RefRecord>>>,
    #[serde(default)]
    pub talents: Option<Vec<Option<RefRecord>>>,
    #[serde(default)]
    pub card_image: Option<ImageRecord>,
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub twitter_handle: Option<String>,
    #[serde(default)]
    pub pond_ref_code: Option<String>,
}

/// Turns raw records into domain characters.
///
/// Defaults are resolved here, once, so the rest of the system never sees a
/// missing faction, location or class name.
#[derive(Debug, Clone, Default)]
pub struct RecordMapper {
    npc_ids: HashSet<String>,
}

impl RecordMapper {
    pub fn new<I, S>(npc_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            npc_ids: npc_ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn character(&self, record: CharacterRecord) -> Character {
        let level = record
            .level
            .filter(|level| level.is_finite() && *level > 0.0)
            .map(|level| level.round().min(f64::from(u32::MAX)) as u32)
            .unwrap_or(0);

        let faction = match record.faction {
            Some(faction) if faction.id != UNDECIDED_FACTION_ID => match non_empty(faction.name) {
                Some(name) => Faction::known(faction.id, name),
                None => Faction::Undecided,
            },
            _ => Faction::Undecided,
        };

        let standing = if self.npc_ids.contains(&record.id) {
            Standing::Npc
        } else {
            Standing::Player
        };

        Character {
            name: non_empty(record.name).unwrap_or_else(|| record.id.clone()),
            level,
            class_name: non_empty(record.class_name)
                .unwrap_or_else(|| DEFAULT_CLASS_NAME.to_string()),
            faction,
            location: record
                .location
                .map(RefRecord::into_named)
                .unwrap_or_else(NamedRef::default_location),
            buffs: record.buffs.unwrap_or_default(),
            skills: named_refs(record.skills),
            talents: named_refs(record.talents),
            card_image: record
                .card_image
                .and_then(|image| image.asset)
                .map(|asset| asset.reference),
            profile_url: non_empty(record.profile_url),
            twitter_handle: non_empty(record.twitter_handle),
            referral_code: non_empty(record.pond_ref_code),
            standing,
            id: record.id,
        }
    }

    pub fn characters(&self, records: Vec<CharacterRecord>) -> Vec<Character> {
        records.into_iter().map(|r| self.character(r)).collect()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Dangling references come back as `null` and are dropped.
fn named_refs(refs: Option<Vec<Option<RefRecord>>>) -> Vec<NamedRef> {
    refs.unwrap_or_default()
        .into_iter()
        .flatten()
        .map(RefRecord::into_named)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapper() -> RecordMapper {
        RecordMapper::new(["69"])
    }

    fn record(value: serde_json::Value) -> CharacterRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_full_record() {
        let c = mapper().character(record(json!({
            "_id": "abc",
            "name": "Aria",
            "level": 17,
            "className": "Ranger",
            "faction": {"_id": "f-1", "name": "Pond"},
            "location": {"_id": "loc-1", "name": "Marsh"},
            "buffs": ["Swift"],
            "skills": [{"_id": "s1", "name": "Volley"}, null],
            "talents": [{"_id": "t1", "name": "Tracking"}],
            "cardImage": {"asset": {"_ref": "image-xyz-png"}},
            "profileUrl": "https://img.test/aria.png",
            "twitterHandle": "",
            "pondRefCode": "POND42"
        })));

        assert_eq!(c.level, 17);
        assert_eq!(c.faction, Faction::known("f-1", "Pond"));
        assert_eq!(c.location.name, "Marsh");
        assert_eq!(c.skills.len(), 1);
        assert_eq!(c.talents[0].name, "Tracking");
        assert_eq!(c.card_image.as_deref(), Some("image-xyz-png"));
        assert_eq!(c.twitter_handle, None);
        assert_eq!(c.referral_code.as_deref(), Some("POND42"));
        assert_eq!(c.standing, Standing::Player);
    }

    #[test]
    fn test_defaults_for_sparse_record() {
        let c = mapper().character(record(json!({"_id": "x1", "name": "Bare", "level": 3})));
        assert!(c.faction.is_undecided());
        assert_eq!(c.class_name, "Undecided");
        assert_eq!(c.location, NamedRef::default_location());
        assert!(c.buffs.is_empty());
    }

    #[test]
    fn test_undecided_faction_id_maps_to_undecided() {
        let c = mapper().character(record(json!({
            "_id": "x2",
            "name": "Waverer",
            "level": 5,
            "faction": {"_id": UNDECIDED_FACTION_ID, "name": "Undecided"}
        })));
        assert!(c.faction.is_undecided());
    }

    #[test]
    fn test_configured_npc_ids() {
        let c = mapper().character(record(json!({"_id": "69", "name": "The Watcher", "level": 99})));
        assert_eq!(c.standing, Standing::Npc);
        assert_eq!(c.display_faction(), "NPC");
    }

    #[test]
    fn test_bad_levels_clamp_to_zero() {
        let c = mapper().character(record(json!({"_id": "n", "name": "Neg", "level": -4})));
        assert_eq!(c.level, 0);
        let c = mapper().character(record(json!({"_id": "m", "name": "None"})));
        assert_eq!(c.level, 0);
        let c = mapper().character(record(json!({"_id": "f", "name": "Frac", "level": 12.6})));
        assert_eq!(c.level, 13);
    }
}
