//! Character domain models.
//!
//! Characters are fetched from the content store and held in memory for the
//! session. Power, lore and display faction are derived, never stored.

mod faction;
mod model;

pub use faction::FactionTheme;
pub use model::{
    Character, DEFAULT_CLASS_NAME, DEFAULT_LOCATION_ID, DEFAULT_LOCATION_NAME, Faction,
    LORE_VALUE, MAX_BASE_POWER, MAX_EXPERIENCE_BONUS, MAX_POWER, NPC_FACTION, NamedRef, Standing,
    UNDECIDED_FACTION, slugify,
};
