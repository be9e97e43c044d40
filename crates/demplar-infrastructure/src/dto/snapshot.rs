//! Collection snapshot DTOs and migrations
//!
//! ## Version History
//! - **1.0.0**: Initial schema (export timestamp plus flattened characters)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

use demplar_core::character::{Character, Faction, NamedRef, Standing};
use demplar_core::snapshot::CatalogSnapshot;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRefV1_0_0 {
    pub id: String,
    pub name: String,
}

impl From<&NamedRef> for NamedRefV1_0_0 {
    fn from(r: &NamedRef) -> Self {
        Self {
            id: r.id.clone(),
            name: r.name.clone(),
        }
    }
}

impl From<NamedRefV1_0_0> for NamedRef {
    fn from(dto: NamedRefV1_0_0) -> Self {
        NamedRef::new(dto.id, dto.name)
    }
}

/// Character DTO V1.0.0
///
/// The faction is stored flat; both faction fields absent means undecided.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotCharacterV1_0_0 {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction_name: Option<String>,
    pub location: NamedRefV1_0_0,
    #[serde(default)]
    pub buffs: Vec<String>,
    #[serde(default)]
    pub skills: Vec<NamedRefV1_0_0>,
    #[serde(default)]
    pub talents: Vec<NamedRefV1_0_0>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
    #[serde(default)]
    pub npc: bool,
}

impl From<&Character> for SnapshotCharacterV1_0_0 {
    fn from(c: &Character) -> Self {
        let (faction_id, faction_name) = match &c.faction {
            Faction::Known { id, name } => (Some(id.clone()), Some(name.clone())),
            Faction::Undecided => (None, None),
        };
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            level: c.level,
            class_name: c.class_name.clone(),
            faction_id,
            faction_name,
            location: (&c.location).into(),
            buffs: c.buffs.clone(),
            skills: c.skills.iter().map(Into::into).collect(),
            talents: c.talents.iter().map(Into::into).collect(),
            card_image: c.card_image.clone(),
            profile_url: c.profile_url.clone(),
            twitter_handle: c.twitter_handle.clone(),
            referral_code: c.referral_code.clone(),
            npc: c.standing == Standing::Npc,
        }
    }
}

impl From<SnapshotCharacterV1_0_0> for Character {
    fn from(dto: SnapshotCharacterV1_0_0) -> Self {
        let faction = match (dto.faction_id, dto.faction_name) {
            (Some(id), Some(name)) => Faction::known(id, name),
            _ => Faction::Undecided,
        };
        Character {
            id: dto.id,
            name: dto.name,
            level: dto.level,
            class_name: dto.class_name,
            faction,
            location: dto.location.into(),
            buffs: dto.buffs,
            skills: dto.skills.into_iter().map(Into::into).collect(),
            talents: dto.talents.into_iter().map(Into::into).collect(),
            card_image: dto.card_image,
            profile_url: dto.profile_url,
            twitter_handle: dto.twitter_handle,
            referral_code: dto.referral_code,
            standing: if dto.npc {
                Standing::Npc
            } else {
                Standing::Player
            },
        }
    }
}

/// Catalog snapshot DTO V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshotV1_0_0 {
    pub exported_at: DateTime<Utc>,
    pub characters: Vec<SnapshotCharacterV1_0_0>,
}

/// Convert CatalogSnapshotV1_0_0 DTO to domain model
impl IntoDomain<CatalogSnapshot> for CatalogSnapshotV1_0_0 {
    fn into_domain(self) -> CatalogSnapshot {
        CatalogSnapshot {
            exported_at: self.exported_at,
            characters: self.characters.into_iter().map(Into::into).collect(),
        }
    }
}

/// Convert domain model to CatalogSnapshotV1_0_0 DTO (for version-migrate save support)
impl FromDomain<CatalogSnapshot> for CatalogSnapshotV1_0_0 {
    fn from_domain(snapshot: CatalogSnapshot) -> Self {
        CatalogSnapshotV1_0_0 {
            exported_at: snapshot.exported_at,
            characters: snapshot.characters.iter().map(Into::into).collect(),
        }
    }
}

/// Creates a Migrator for CatalogSnapshot entities.
pub fn create_snapshot_migrator() -> version_migrate::Migrator {
    version_migrate::migrator!("catalog_snapshot" => [
        CatalogSnapshotV1_0_0,
        CatalogSnapshot
    ], save = true)
    .expect("Failed to create catalog_snapshot migrator")
}
