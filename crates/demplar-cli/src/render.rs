//! Terminal rendering of catalog and news views.

use colored::{Color, ColoredString, Colorize};

use demplar_application::{CharacterProfile, NewsArticle};
use demplar_core::catalog::{CompareOutcome, ComparisonRow, DatabaseStats, FactionBreakdown};
use demplar_core::character::{Character, FactionTheme};
use demplar_core::news::ContentBlock;

fn theme_color(theme: FactionTheme) -> Color {
    match theme {
        FactionTheme::Demplar => Color::Red,
        FactionTheme::Pond => Color::Green,
        FactionTheme::Pork => Color::BrightMagenta,
        FactionTheme::Npc => Color::BrightBlack,
        FactionTheme::Undecided => Color::Magenta,
    }
}

fn faction_label(character: &Character) -> ColoredString {
    let theme = character.theme();
    format!("{} {}", theme.icon(), character.display_faction()).color(theme_color(theme))
}

/// Placeholder for statistics that are undefined on an empty collection.
pub fn stat_value(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub fn rank_text(rank: usize, out_of: usize) -> String {
    format!("#{rank} of {out_of}")
}

pub fn faction_rank_text(rank: usize, faction: &str) -> String {
    format!("#{rank} in {faction}")
}

pub fn print_character_line(character: &Character, is_favorite: bool) {
    let marker = if is_favorite { "★".yellow() } else { " ".normal() };
    println!(
        "{} {:<24} {:>7}  {:<16} {}  {}",
        marker,
        character.name.bold(),
        format!("Lv {}", character.level),
        character.class_name,
        faction_label(character),
        format!("[{}]", character.id).bright_black()
    );
}

pub fn print_character_list(characters: &[&Character], is_favorite: impl Fn(&str) -> bool) {
    if characters.is_empty() {
        println!("{}", "No characters match.".bright_black());
        return;
    }
    for character in characters {
        print_character_line(character, is_favorite(&character.id));
    }
    println!("{}", format!("{} shown", characters.len()).bright_black());
}

pub fn print_stats(stats: &DatabaseStats, breakdown: &[FactionBreakdown<'_>]) {
    println!("{}", "📊 Database Statistics".bright_magenta().bold());
    println!("  Total characters: {}", stats.total.to_string().bold());
    println!("  Average level:    {}", stat_value(stats.average_level).bold());
    println!("  Highest level:    {}", stat_value(stats.max_level).bold());
    println!("  With images:      {}", stats.with_images.to_string().bold());

    if breakdown.is_empty() {
        return;
    }
    println!();
    println!("{}", "Factions".bright_magenta().bold());
    for group in breakdown {
        let theme = group.theme();
        println!(
            "  {} {:<12} {:>3} members  avg Lv {:<4} top: {} (Lv {})",
            theme.icon(),
            group.faction.color(theme_color(theme)).bold(),
            group.count,
            group.average_level,
            group.top.name,
            group.top.level
        );
    }
}

pub fn print_character_of_day(character: Option<&Character>) {
    if let Some(c) = character {
        println!(
            "{} {} (Lv {} {})  {}",
            "🌟 Character of the day:".bright_yellow().bold(),
            c.name.bold(),
            c.level,
            c.class_name,
            faction_label(c)
        );
    }
}

pub fn print_profile(profile: &CharacterProfile<'_>, share_url: &str) {
    let c = profile.character;
    let favorite = if profile.is_favorite { " ❤️" } else { "" };
    println!("{}{}", c.name.bright_white().bold(), favorite);
    println!("  {}  Lv {}  {}", c.class_name, c.level, faction_label(c));
    println!("  Location: {}", c.location.name);
    println!(
        "  Power: {}  Lore: {}",
        profile.standing.power.to_string().bold(),
        profile.standing.lore.to_string().bold()
    );
    println!(
        "    Base power: {}  Experience bonus: {}",
        profile.standing.base_power,
        profile.standing.experience_bonus
    );
    println!(
        "  Rank: {}   Faction rank: {}",
        rank_text(profile.standing.rank, profile.standing.out_of),
        faction_rank_text(profile.standing.faction_rank, c.faction.name())
    );
    if !c.buffs.is_empty() {
        println!("  Buffs: {}", c.buffs.join(", "));
    }
    if !c.skills.is_empty() {
        let names: Vec<&str> = c.skills.iter().map(|s| s.name.as_str()).collect();
        println!("  Skills: {}", names.join(", "));
    }
    if !c.talents.is_empty() {
        let names: Vec<&str> = c.talents.iter().map(|s| s.name.as_str()).collect();
        println!("  Talents: {}", names.join(", "));
    }
    if let Some(handle) = &c.twitter_handle {
        println!("  Twitter: {handle}");
    }
    if let Some(url) = &c.profile_url {
        println!("  Image: {url}");
    }
    if profile.in_comparison {
        println!("  {}", "In comparison".cyan());
    }
    println!("  {}", share_url.bright_black());
}

pub fn print_compare_outcome(outcome: &CompareOutcome) {
    let notice = outcome.notice();
    if outcome.changed() {
        println!("{}", notice.green());
    } else {
        println!("{}", notice.yellow());
    }
}

pub fn print_comparison(rows: &[ComparisonRow]) {
    if rows.is_empty() {
        println!("{}", "Select at least two characters to compare.".bright_black());
        return;
    }
    println!(
        "{}",
        format!(
            "{:<20} {:>5} {:<12} {:>6} {:>5} {:>5}",
            "Name", "Level", "Faction", "Power", "Lore", "Rank"
        )
        .bold()
    );
    for row in rows {
        println!(
            "{:<20} {:>5} {:<12} {:>6} {:>5} {:>5}",
            row.name,
            row.level,
            row.faction,
            row.power,
            row.lore,
            format!("#{}", row.rank)
        );
    }
}

pub fn print_article(article: &NewsArticle<'_>, full: bool) {
    let entry = article.entry;
    let mut title = entry.title.bright_white().bold().to_string();
    if article.is_latest {
        title.push_str(&format!(" {}", "Latest".blue()));
    }
    println!("{title}");

    let mut meta = vec![format!("✍️ {}", entry.author_name())];
    if let Some(at) = entry.published_at {
        meta.insert(0, format!("📅 {}", at.format("%A, %B %-d, %Y")));
    }
    if let Some(minutes) = article.reading_time_minutes {
        meta.push(format!("📖 {minutes} min read"));
    }
    println!("{}", meta.join("  ").bright_black());
    println!("{}", format!("[{}]", entry.id).bright_black());
    println!();

    match (&article.preview, full) {
        (Some(preview), false) => println!("{preview}"),
        _ => print_blocks(&article.blocks()),
    }
    println!();
}

fn print_blocks(blocks: &[ContentBlock]) {
    for (index, block) in blocks.iter().enumerate() {
        if index > 0 {
            println!();
        }
        match block {
            ContentBlock::Paragraph(lines) => {
                for line in lines {
                    println!("{line}");
                }
            }
            ContentBlock::Bullets(items) => {
                for item in items {
                    println!("  {} {item}", "•".bright_black());
                }
            }
            ContentBlock::Rule => println!("{}", "─".repeat(40).bright_black()),
        }
    }
}
