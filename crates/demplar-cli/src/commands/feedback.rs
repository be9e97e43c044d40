//! Feedback e-mail and character sharing.

use anyhow::Result;
use chrono::Local;
use colored::Colorize;

use demplar_core::share::{CharacterShare, FeedbackMessage};

use super::AppContext;

pub fn feedback(ctx: &AppContext, subject: &str, message: &str, plain: bool) -> Result<()> {
    let sent_at = Local::now().naive_local();
    let composed = FeedbackMessage::compose(&ctx.config.feedback, subject, message, sent_at)?;

    if plain {
        println!("{}", composed.plain_text());
    } else {
        println!("{}", composed.mailto_link());
        println!(
            "{}",
            "Open the link above in your mail client to send the message.".bright_black()
        );
    }
    Ok(())
}

pub async fn share(ctx: &AppContext, id: &str) -> Result<()> {
    let session = ctx.loaded_session().await?;
    let character = session.find(id)?;
    let share = CharacterShare::new(character, &ctx.config.catalog.site_url);
    println!("{}", share.title.bold());
    println!("{}", share.clipboard_text());
    Ok(())
}
