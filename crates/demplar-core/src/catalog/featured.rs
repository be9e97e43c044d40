//! Character of the day.

use chrono::NaiveDate;

use crate::character::Character;

/// Picks one character per calendar day.
///
/// The seed is the sum of the character codes of the date written as
/// `Tue Jun 04 2024`; the pick is that seed modulo the collection size, so
/// everyone sees the same character on a given day. NPCs are included.
pub fn character_of_day(characters: &[Character], date: NaiveDate) -> Option<&Character> {
    if characters.is_empty() {
        return None;
    }
    let seed: usize = date
        .format("%a %b %d %Y")
        .to_string()
        .chars()
        .map(|c| c as usize)
        .sum();
    characters.get(seed % characters.len())
}
