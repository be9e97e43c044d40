//! Character catalog subcommands.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;

use demplar_application::AdminPanel;
use demplar_core::catalog::{CharacterQuery, FactionFilter, LevelBucket, character_of_day};
use demplar_core::share::CharacterShare;
use demplar_infrastructure::FileSnapshotRepository;

use super::AppContext;
use crate::render;

pub async fn list(
    ctx: &AppContext,
    search: Option<String>,
    level: LevelBucket,
    faction: Option<String>,
) -> Result<()> {
    let session = ctx.loaded_session().await?;
    let query = CharacterQuery {
        text: search.unwrap_or_default(),
        level,
        faction: faction.as_deref().map(FactionFilter::from).unwrap_or_default(),
    };
    render::print_character_list(&session.search(&query), |id| session.is_favorite(id));
    Ok(())
}

pub async fn stats(ctx: &AppContext) -> Result<()> {
    let session = ctx.loaded_session().await?;
    render::print_stats(&session.statistics(), &session.faction_breakdown());
    println!();
    render::print_character_of_day(character_of_day(
        session.characters(),
        Local::now().date_naive(),
    ));
    Ok(())
}

pub async fn profile(ctx: &AppContext, id: &str) -> Result<()> {
    let session = ctx.loaded_session().await?;
    let profile = session.profile(id)?;
    let share = CharacterShare::new(profile.character, &ctx.config.catalog.site_url);
    render::print_profile(&profile, &share.url);
    Ok(())
}

/// Flips the favorite flag. The collection is not fetched, so unknown ids
/// are stored as given.
pub fn favorite(ctx: &AppContext, id: &str) -> Result<()> {
    let mut session = ctx.session()?;
    if session.toggle_favorite(id) {
        println!("{}", format!("Added {id} to favorites").green());
    } else {
        println!("{}", format!("Removed {id} from favorites").yellow());
    }
    Ok(())
}

pub async fn favorites(ctx: &AppContext) -> Result<()> {
    let session = ctx.loaded_session().await?;
    let favorites = session.favorite_characters();
    if favorites.is_empty() {
        println!("{}", "No favorites yet. Mark characters with 'demplar favorite <id>'.".bright_black());
        return Ok(());
    }
    render::print_character_list(&favorites, |_| true);
    Ok(())
}

pub async fn compare(ctx: &AppContext, ids: &[String]) -> Result<()> {
    let mut session = ctx.loaded_session().await?;
    for id in ids {
        let outcome = session.toggle_compare(id)?;
        if !outcome.changed() {
            render::print_compare_outcome(&outcome);
        }
    }
    render::print_comparison(&session.comparison_table());
    Ok(())
}

pub async fn export(ctx: &AppContext, path: Option<PathBuf>) -> Result<()> {
    let session = ctx.loaded_session().await?;
    if session.characters().is_empty() {
        println!("{}", "No characters loaded; nothing exported.".yellow());
        return Ok(());
    }
    let admin = AdminPanel::new(Arc::new(FileSnapshotRepository::new()));
    let written = admin
        .export(&session, path.as_deref())
        .await
        .context("Failed to export characters")?;
    println!(
        "{}",
        format!(
            "Exported {} characters to {}",
            session.characters().len(),
            written.display()
        )
        .green()
    );
    Ok(())
}
