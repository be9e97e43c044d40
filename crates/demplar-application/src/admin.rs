//! Admin panel use case: in-memory edits and collection export.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use strum::{Display, EnumIter, EnumString};

use demplar_core::character::Character;
use demplar_core::snapshot::{CatalogSnapshot, DEFAULT_SNAPSHOT_FILE, SnapshotRepository};
use demplar_core::{DemplarError, Result};

use crate::catalog_session::CatalogSession;

/// Character fields the admin panel may edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum CharacterField {
    Name,
    Level,
    #[strum(serialize = "class")]
    ClassName,
    Location,
    #[strum(serialize = "twitter")]
    TwitterHandle,
    ProfileUrl,
}

impl CharacterField {
    /// Writes `value` into `character`.
    ///
    /// Empty values clear optional fields; required text fields reject them.
    pub fn apply(&self, character: &mut Character, value: &str) -> Result<()> {
        let value = value.trim();
        match self {
            CharacterField::Name => character.name = required(self, value)?,
            CharacterField::Level => {
                character.level = value.parse().map_err(|_| {
                    DemplarError::validation(format!("Level must be a whole number, got '{value}'"))
                })?;
            }
            CharacterField::ClassName => character.class_name = required(self, value)?,
            CharacterField::Location => character.location.name = required(self, value)?,
            CharacterField::TwitterHandle => character.twitter_handle = optional(value),
            CharacterField::ProfileUrl => character.profile_url = optional(value),
        }
        Ok(())
    }
}

fn required(field: &CharacterField, value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(DemplarError::validation(format!("{field} cannot be empty")));
    }
    Ok(value.to_string())
}

fn optional(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

pub struct AdminPanel {
    repository: Arc<dyn SnapshotRepository>,
}

impl AdminPanel {
    pub fn new(repository: Arc<dyn SnapshotRepository>) -> Self {
        Self { repository }
    }

    /// Edits one field of a character held by `session`.
    pub fn update(
        &self,
        session: &mut CatalogSession,
        id: &str,
        field: CharacterField,
        value: &str,
    ) -> Result<Character> {
        let updated = session.update_character(id, |c| field.apply(c, value))?;
        tracing::debug!("Updated {} of character {}", field, id);
        Ok(updated.clone())
    }

    /// Writes the session's collection to `path`, or to
    /// `demplar-chars.json` in the working directory.
    pub async fn export(&self, session: &CatalogSession, path: Option<&Path>) -> Result<PathBuf> {
        let target = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_FILE));
        let snapshot = CatalogSnapshot::new(session.characters().to_vec());
        self.repository.export(&target, &snapshot).await?;
        Ok(target)
    }
}
