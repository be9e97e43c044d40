use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use demplar_core::catalog::LevelBucket;
use demplar_infrastructure::ConfigService;

mod commands;
mod render;

use commands::AppContext;

#[derive(Parser)]
#[command(name = "demplar")]
#[command(about = "Demplar character database - browse, compare and share characters", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List characters, favorites first
    List {
        /// Match against name or class
        #[arg(short, long)]
        search: Option<String>,
        /// Level range: all, 1-10, 11-20, 21-30, 31-40, 41-50, 50+
        #[arg(short, long, default_value = "all")]
        level: LevelBucket,
        /// Faction name, or "all"
        #[arg(short, long)]
        faction: Option<String>,
    },
    /// Database statistics and faction breakdown
    Stats,
    /// Show one character's profile
    Profile { id: String },
    /// Toggle a character as favorite
    Favorite { id: String },
    /// List favorite characters
    Favorites,
    /// Compare up to three characters side by side
    Compare {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
    /// Show the news feed, or one article by id
    News {
        id: Option<String>,
        /// Print every article in full instead of a preview
        #[arg(long)]
        full: bool,
    },
    /// Export the collection to a snapshot file
    Export { path: Option<PathBuf> },
    /// Compose a feedback e-mail
    Feedback {
        subject: String,
        #[arg(short, long, default_value = "")]
        message: String,
        /// Print the e-mail as text instead of a mailto link
        #[arg(long)]
        plain: bool,
    },
    /// Print share text and link for a character
    Share { id: String },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Start the interactive shell
    Shell,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Config {
        action: ConfigAction::Init { force },
    } = &cli.command
    {
        let service = match &cli.config {
            Some(path) => ConfigService::with_path(path.clone()),
            None => ConfigService::new(),
        };
        return commands::config::init(&service, *force);
    }

    let ctx = AppContext::load(cli.config)?;

    match cli.command {
        Commands::List {
            search,
            level,
            faction,
        } => commands::catalog::list(&ctx, search, level, faction).await?,
        Commands::Stats => commands::catalog::stats(&ctx).await?,
        Commands::Profile { id } => commands::catalog::profile(&ctx, &id).await?,
        Commands::Favorite { id } => commands::catalog::favorite(&ctx, &id)?,
        Commands::Favorites => commands::catalog::favorites(&ctx).await?,
        Commands::Compare { ids } => commands::catalog::compare(&ctx, &ids).await?,
        Commands::News { id, full } => commands::news::show(&ctx, id.as_deref(), full).await?,
        Commands::Export { path } => commands::catalog::export(&ctx, path).await?,
        Commands::Feedback {
            subject,
            message,
            plain,
        } => commands::feedback::feedback(&ctx, &subject, &message, plain)?,
        Commands::Share { id } => commands::feedback::share(&ctx, &id).await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&ctx)?,
            ConfigAction::Init { force } => commands::config::init(&ctx.config_service, force)?,
        },
        Commands::Shell => commands::shell::run(&ctx).await?,
    }

    Ok(())
}
