//! Interactive shell.
//!
//! Holds one catalog session, the news feed and the news board for the
//! lifetime of the REPL, so favorites, comparison picks, edits and posted
//! news carry over between commands.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::{Local, Utc};
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use demplar_application::{AdminPanel, CatalogSession, CharacterField, NewsBoard, NewsFeed};
use demplar_core::catalog::{CharacterQuery, FactionFilter, LevelBucket, character_of_day};
use demplar_core::share::{CharacterShare, FeedbackMessage};
use demplar_infrastructure::FileSnapshotRepository;

use super::AppContext;
use crate::render;

const COMMANDS: &[&str] = &[
    "list", "search", "level", "faction", "reset", "show", "fav", "favs", "compare", "table",
    "stats", "news", "read", "share", "edit", "export", "post", "board", "unpost", "feedback",
    "reload", "help", "quit", "exit",
];

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    List,
    Search(String),
    Level(LevelBucket),
    Faction(FactionFilter),
    Reset,
    Show(String),
    Favorite(String),
    Favorites,
    Compare(String),
    CompareClear,
    Table,
    Stats,
    News,
    Read(String),
    Share(String),
    Edit {
        id: String,
        field: CharacterField,
        value: String,
    },
    Export(Option<PathBuf>),
    Post {
        title: String,
        content: String,
    },
    Board,
    Unpost(String),
    Feedback {
        subject: String,
        message: String,
    },
    Reload,
    Help,
    Quit,
}

impl ShellCommand {
    fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "list" | "ls" => ShellCommand::List,
            "search" => ShellCommand::Search(rest.to_string()),
            "level" => {
                let bucket = if rest.is_empty() { "all" } else { rest };
                ShellCommand::Level(bucket.parse().map_err(|_| {
                    format!("Unknown level range '{bucket}'. Try 1-10, 11-20, ..., 50+ or all")
                })?)
            }
            "faction" => {
                let name = if rest.is_empty() { "all" } else { rest };
                ShellCommand::Faction(FactionFilter::from(name))
            }
            "reset" => ShellCommand::Reset,
            "show" => ShellCommand::Show(required(rest, "show <id>")?),
            "fav" => ShellCommand::Favorite(required(rest, "fav <id>")?),
            "favs" => ShellCommand::Favorites,
            "compare" if rest == "clear" => ShellCommand::CompareClear,
            "compare" => ShellCommand::Compare(required(rest, "compare <id> | compare clear")?),
            "table" => ShellCommand::Table,
            "stats" => ShellCommand::Stats,
            "news" => ShellCommand::News,
            "read" => ShellCommand::Read(required(rest, "read <news-id>")?),
            "share" => ShellCommand::Share(required(rest, "share <id>")?),
            "edit" => {
                let usage = "edit <id> <field> <value>";
                let mut parts = rest.splitn(3, char::is_whitespace);
                let id = parts.next().filter(|s| !s.is_empty());
                let field = parts.next().filter(|s| !s.is_empty());
                let (Some(id), Some(field)) = (id, field) else {
                    return Err(format!("Usage: {usage}"));
                };
                let field: CharacterField = field.parse().map_err(|_| {
                    format!(
                        "Unknown field '{field}'. Editable: name, level, class, location, twitter, profile-url"
                    )
                })?;
                ShellCommand::Edit {
                    id: id.to_string(),
                    field,
                    value: parts.next().unwrap_or("").to_string(),
                }
            }
            "export" => ShellCommand::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "post" => {
                let (title, content) = split_pair(rest, "post <title> | <content>")?;
                ShellCommand::Post { title, content }
            }
            "board" => ShellCommand::Board,
            "unpost" => ShellCommand::Unpost(required(rest, "unpost <news-id>")?),
            "feedback" => {
                let (subject, message) = match rest.split_once('|') {
                    Some((subject, message)) => (subject.trim(), message.trim()),
                    None => (rest, ""),
                };
                ShellCommand::Feedback {
                    subject: subject.to_string(),
                    message: message.to_string(),
                }
            }
            "reload" => ShellCommand::Reload,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => return Err(format!("Unknown command '{other}'. Type 'help' for a list.")),
        };
        Ok(command)
    }
}

fn required(rest: &str, usage: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("Usage: {usage}"))
    } else {
        Ok(rest.to_string())
    }
}

fn split_pair(rest: &str, usage: &str) -> Result<(String, String), String> {
    rest.split_once('|')
        .map(|(a, b)| (a.trim().to_string(), b.trim().to_string()))
        .ok_or_else(|| format!("Usage: {usage}"))
}

/// Rustyline helper: completes and hints command words.
#[derive(Clone)]
struct ShellHelper {
    commands: Vec<String>,
}

impl ShellHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if line.contains(' ') {
            return Ok((0, vec![]));
        }
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let word = line.split_whitespace().next().unwrap_or("");
        if line.starts_with(word) && self.commands.iter().any(|c| c == word) {
            Owned(format!("{}{}", word.bright_cyan(), &line[word.len()..]))
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() || line.contains(' ') {
            return None;
        }
        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for ShellHelper {}

struct Shell<'a> {
    ctx: &'a AppContext,
    session: CatalogSession,
    feed: NewsFeed,
    board: NewsBoard,
    admin: AdminPanel,
}

impl<'a> Shell<'a> {
    async fn open(ctx: &'a AppContext) -> Result<Self> {
        let session = ctx.loaded_session().await?;
        let feed = ctx.loaded_news_feed().await?;
        Ok(Self {
            ctx,
            session,
            feed,
            board: NewsBoard::new(),
            admin: AdminPanel::new(Arc::new(FileSnapshotRepository::new())),
        })
    }

    fn print_character_of_day(&self) {
        render::print_character_of_day(character_of_day(
            self.session.characters(),
            Local::now().date_naive(),
        ));
    }

    fn print_visible(&self) {
        render::print_character_list(&self.session.visible(), |id| self.session.is_favorite(id));
    }

    fn update_query(&mut self, edit: impl FnOnce(&mut CharacterQuery)) {
        let mut query = self.session.query().clone();
        edit(&mut query);
        self.session.set_query(query);
        self.print_visible();
    }

    /// Runs one command. Returns false when the shell should exit.
    async fn execute(&mut self, command: ShellCommand) -> Result<bool> {
        match command {
            ShellCommand::List => self.print_visible(),
            ShellCommand::Search(text) => self.update_query(|q| q.text = text),
            ShellCommand::Level(level) => self.update_query(|q| q.level = level),
            ShellCommand::Faction(faction) => self.update_query(|q| q.faction = faction),
            ShellCommand::Reset => self.update_query(|q| *q = CharacterQuery::default()),
            ShellCommand::Show(id) => {
                self.session.select(&id)?;
                let profile = self.session.profile(&id)?;
                let share = CharacterShare::new(profile.character, &self.ctx.config.catalog.site_url);
                render::print_profile(&profile, &share.url);
            }
            ShellCommand::Favorite(id) => {
                let name = self.session.find(&id)?.name.clone();
                if self.session.toggle_favorite(&id) {
                    println!("{}", format!("❤️ {name} added to favorites").green());
                } else {
                    println!("{}", format!("{name} removed from favorites").yellow());
                }
            }
            ShellCommand::Favorites => {
                let favorites = self.session.favorite_characters();
                if favorites.is_empty() {
                    println!("{}", "No favorites yet. Use 'fav <id>'.".bright_black());
                } else {
                    render::print_character_list(&favorites, |_| true);
                }
            }
            ShellCommand::Compare(id) => {
                let outcome = self.session.toggle_compare(&id)?;
                render::print_compare_outcome(&outcome);
            }
            ShellCommand::CompareClear => {
                self.session.clear_compare();
                println!("{}", "Comparison cleared".green());
            }
            ShellCommand::Table => render::print_comparison(&self.session.comparison_table()),
            ShellCommand::Stats => {
                render::print_stats(&self.session.statistics(), &self.session.faction_breakdown());
                println!();
                self.print_character_of_day();
            }
            ShellCommand::News => {
                let articles = self.board.articles_over(self.feed.entries());
                if articles.is_empty() {
                    println!("{}", "No news yet.".bright_black());
                }
                for article in &articles {
                    render::print_article(article, false);
                }
            }
            ShellCommand::Read(id) => {
                let articles = self.board.articles_over(self.feed.entries());
                match articles.iter().find(|a| a.entry.id == id) {
                    Some(article) => render::print_article(article, true),
                    None => println!("{}", format!("No news entry '{id}'").yellow()),
                }
            }
            ShellCommand::Share(id) => {
                let character = self.session.find(&id)?;
                let share = CharacterShare::new(character, &self.ctx.config.catalog.site_url);
                println!("{}", share.clipboard_text());
            }
            ShellCommand::Edit { id, field, value } => {
                let updated = self.admin.update(&mut self.session, &id, field, &value)?;
                println!(
                    "{}",
                    format!("Updated {field} of {} ({})", updated.name, updated.id).green()
                );
            }
            ShellCommand::Export(path) => {
                let written = self.admin.export(&self.session, path.as_deref()).await?;
                println!("{}", format!("Exported to {}", written.display()).green());
            }
            ShellCommand::Post { title, content } => {
                let entry = self.board.publish(&title, &content, Utc::now())?;
                println!("{}", format!("Published '{}' as {}", entry.title, entry.id).green());
            }
            ShellCommand::Board => {
                let articles = self.board.articles();
                if articles.is_empty() {
                    println!("{}", "The board is empty. Use 'post <title> | <content>'.".bright_black());
                }
                for article in &articles {
                    render::print_article(article, false);
                }
            }
            ShellCommand::Unpost(id) => {
                let removed = self.board.delete(&id)?;
                println!("{}", format!("Deleted '{}'", removed.title).green());
            }
            ShellCommand::Feedback { subject, message } => {
                let composed = FeedbackMessage::compose(
                    &self.ctx.config.feedback,
                    &subject,
                    &message,
                    Local::now().naive_local(),
                )?;
                println!("{}", composed.mailto_link());
            }
            ShellCommand::Reload => {
                let count = self.session.load().await?;
                self.feed.load().await?;
                println!("{}", format!("Loaded {count} characters").green());
            }
            ShellCommand::Help => print_help(),
            ShellCommand::Quit => return Ok(false),
        }
        Ok(true)
    }
}

fn print_help() {
    let rows = [
        ("list", "Characters matching the current filters"),
        ("search <text>", "Filter by name or class"),
        ("level <range>", "Filter by level: 1-10 ... 50+, all"),
        ("faction <name>", "Filter by faction name, all"),
        ("reset", "Clear all filters"),
        ("show <id>", "Character profile"),
        ("fav <id> / favs", "Toggle a favorite / list favorites"),
        ("compare <id> / compare clear", "Pick up to three characters"),
        ("table", "Side-by-side comparison"),
        ("stats", "Database statistics and faction breakdown"),
        ("news / read <id>", "News feed / one article in full"),
        ("share <id>", "Share text and link"),
        ("edit <id> <field> <value>", "Edit name, level, class, location, twitter, profile-url"),
        ("export [path]", "Write the collection to a snapshot file"),
        ("post <title> | <content>", "Publish to the news board"),
        ("board / unpost <id>", "Board entries / delete one"),
        ("feedback <subject> | <message>", "Compose a feedback e-mail link"),
        ("reload", "Fetch characters and news again"),
        ("quit", "Leave the shell"),
    ];
    for (usage, description) in rows {
        println!("  {:<32} {}", usage.bright_cyan(), description.bright_black());
    }
}

pub async fn run(ctx: &AppContext) -> Result<()> {
    let mut shell = Shell::open(ctx).await?;

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ShellHelper::new()));

    println!("{}", "=== Demplar Character Database ===".bright_magenta().bold());
    println!(
        "{}",
        format!(
            "{} characters loaded. Type 'help' for commands or 'quit' to exit.",
            shell.session.characters().len()
        )
        .bright_black()
    );
    shell.print_character_of_day();
    println!();

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let command = match ShellCommand::parse(trimmed) {
                    Ok(command) => command,
                    Err(message) => {
                        println!("{}", message.yellow());
                        continue;
                    }
                };
                match shell.execute(command).await {
                    Ok(true) => {}
                    Ok(false) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Err(e) => eprintln!("{}", format!("Error: {e}").red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filters() {
        assert_eq!(ShellCommand::parse("ls").unwrap(), ShellCommand::List);
        assert_eq!(
            ShellCommand::parse("search  dark knight ").unwrap(),
            ShellCommand::Search("dark knight".to_string())
        );
        assert_eq!(
            ShellCommand::parse("level 50+").unwrap(),
            ShellCommand::Level(LevelBucket::AboveFifty)
        );
        assert_eq!(ShellCommand::parse("level").unwrap(), ShellCommand::Level(LevelBucket::All));
        assert!(ShellCommand::parse("level 7").is_err());
        assert_eq!(
            ShellCommand::parse("faction Pond").unwrap(),
            ShellCommand::Faction(FactionFilter::Named("Pond".to_string()))
        );
        assert_eq!(ShellCommand::parse("faction").unwrap(), ShellCommand::Faction(FactionFilter::All));
    }

    #[test]
    fn test_parse_edit() {
        assert_eq!(
            ShellCommand::parse("edit 42 class Battle Mage").unwrap(),
            ShellCommand::Edit {
                id: "42".to_string(),
                field: CharacterField::ClassName,
                value: "Battle Mage".to_string(),
            }
        );
        assert_eq!(
            ShellCommand::parse("edit 42 twitter").unwrap(),
            ShellCommand::Edit {
                id: "42".to_string(),
                field: CharacterField::TwitterHandle,
                value: String::new(),
            }
        );
        assert!(ShellCommand::parse("edit 42 power 9000").is_err());
        assert!(ShellCommand::parse("edit").is_err());
    }

    #[test]
    fn test_parse_post_and_feedback() {
        assert_eq!(
            ShellCommand::parse("post Patch notes | New raid tonight").unwrap(),
            ShellCommand::Post {
                title: "Patch notes".to_string(),
                content: "New raid tonight".to_string(),
            }
        );
        assert!(ShellCommand::parse("post no separator").is_err());
        assert_eq!(
            ShellCommand::parse("feedback Bug").unwrap(),
            ShellCommand::Feedback {
                subject: "Bug".to_string(),
                message: String::new(),
            }
        );
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(ShellCommand::parse("compare clear").unwrap(), ShellCommand::CompareClear);
        assert_eq!(
            ShellCommand::parse("compare 7").unwrap(),
            ShellCommand::Compare("7".to_string())
        );
        assert_eq!(ShellCommand::parse("export").unwrap(), ShellCommand::Export(None));
        assert_eq!(ShellCommand::parse("exit").unwrap(), ShellCommand::Quit);
        assert!(ShellCommand::parse("show").is_err());
        assert!(ShellCommand::parse("dance").is_err());
    }
}
