use anyhow::Result;
use colored::Colorize;

use super::AppContext;
use crate::render;

/// Prints the feed, or one article in full when `id` is given.
pub async fn show(ctx: &AppContext, id: Option<&str>, full: bool) -> Result<()> {
    let feed = ctx.loaded_news_feed().await?;

    if let Some(id) = id {
        render::print_article(&feed.article(id)?, true);
        return Ok(());
    }

    let articles = feed.articles();
    if articles.is_empty() {
        println!("{}", "No news yet.".bright_black());
        return Ok(());
    }
    for article in &articles {
        render::print_article(article, full);
    }
    Ok(())
}
