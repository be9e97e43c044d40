//! Pure computations over the character collection: filtering, ordering,
//! statistics and comparison.

mod compare;
mod featured;
mod filter;
mod stats;

pub use compare::{CompareOutcome, CompareSelection, ComparisonRow, MAX_COMPARE};
pub use featured::character_of_day;
pub use filter::{
    CharacterQuery, FactionFilter, LevelBucket, compare_for_listing, compare_names,
    filter_characters,
};
pub use stats::{
    CharacterStanding, DatabaseStats, FactionBreakdown, eligible, faction_breakdown,
    faction_rank, overall_rank,
};
