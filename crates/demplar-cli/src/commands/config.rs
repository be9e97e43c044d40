//! Config file management.

use anyhow::{Context, Result};
use colored::Colorize;

use demplar_infrastructure::ConfigService;

use super::AppContext;

/// Writes the default config. Takes the bare service so a malformed
/// existing file can still be replaced with `--force`.
pub fn init(service: &ConfigService, force: bool) -> Result<()> {
    let path = service
        .init_default(force)
        .context("Failed to write default config")?;
    println!("{}", format!("Wrote {}", path.display()).green());
    Ok(())
}

/// Prints the effective configuration, environment overrides included.
pub fn show(ctx: &AppContext) -> Result<()> {
    let path = ctx.config_service.config_path()?;
    let mut config = ctx.config.clone();
    if config.content.token.is_some() {
        config.content.token = Some("********".to_string());
    }
    let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
    println!("{}", format!("# {}", path.display()).bright_black());
    print!("{rendered}");
    Ok(())
}
