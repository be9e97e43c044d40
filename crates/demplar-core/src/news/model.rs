use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One block of rich text: a paragraph, heading or list item made of spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    /// Block style such as `normal` or `h2`.
    #[serde(default = "default_style")]
    pub style: String,
    /// List kind (`bullet`, `number`) when the block is a list item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_item: Option<String>,
    #[serde(default)]
    pub spans: Vec<String>,
}

fn default_style() -> String {
    "normal".to_string()
}

impl TextBlock {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            style: default_style(),
            list_item: None,
            spans: vec![text.into()],
        }
    }

    pub fn bullet(text: impl Into<String>) -> Self {
        Self {
            style: default_style(),
            list_item: Some("bullet".to_string()),
            spans: vec![text.into()],
        }
    }

    pub fn text(&self) -> String {
        self.spans.concat()
    }
}

/// Body of a news entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum NewsBody {
    /// Authored locally as plain text.
    Plain(String),
    /// Rich text from the content store.
    Blocks(Vec<TextBlock>),
}

impl Default for NewsBody {
    fn default() -> Self {
        NewsBody::Plain(String::new())
    }
}

impl NewsBody {
    /// Flattens the body to plain text.
    ///
    /// Blocks are separated by blank lines, except that consecutive list
    /// items stay on adjacent lines so they format as one bullet list.
    pub fn plain_text(&self) -> String {
        let blocks = match self {
            NewsBody::Plain(text) => return text.clone(),
            NewsBody::Blocks(blocks) => blocks,
        };

        let mut out = String::new();
        let mut previous_was_item = false;
        for block in blocks {
            let is_item = block.list_item.is_some();
            if !out.is_empty() {
                out.push_str(if is_item && previous_was_item { "\n" } else { "\n\n" });
            }
            if is_item {
                out.push_str("• ");
            }
            out.push_str(&block.text());
            previous_was_item = is_item;
        }
        out
    }
}

/// A news entry as shown by the news feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsEntry {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub body: NewsBody,
}

impl NewsEntry {
    pub fn author_name(&self) -> &str {
        self.author.as_deref().unwrap_or("Unknown")
    }

    pub fn content(&self) -> String {
        self.body.plain_text()
    }
}

/// Orders entries newest first; undated entries go last.
pub fn sort_latest_first(entries: &mut [NewsEntry]) {
    entries.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(id: &str, day: Option<u32>) -> NewsEntry {
        NewsEntry {
            id: id.to_string(),
            title: format!("Entry {id}"),
            author: None,
            published_at: day.map(|d| Utc.with_ymd_and_hms(2024, 5, d, 12, 0, 0).unwrap()),
            body: NewsBody::default(),
        }
    }

    #[test]
    fn test_plain_text_from_blocks() {
        let body = NewsBody::Blocks(vec![
            TextBlock::paragraph("The season begins."),
            TextBlock::bullet("New quests"),
            TextBlock::bullet("New loot"),
            TextBlock::paragraph("See you there."),
        ]);
        assert_eq!(
            body.plain_text(),
            "The season begins.\n\n• New quests\n• New loot\n\nSee you there."
        );
    }

    #[test]
    fn test_multi_span_block_is_concatenated() {
        let block = TextBlock {
            style: "normal".to_string(),
            list_item: None,
            spans: vec!["Hello, ".to_string(), "world".to_string()],
        };
        assert_eq!(NewsBody::Blocks(vec![block]).plain_text(), "Hello, world");
    }

    #[test]
    fn test_sort_latest_first() {
        let mut entries = vec![entry("a", Some(1)), entry("b", None), entry("c", Some(9))];
        sort_latest_first(&mut entries);
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_author_fallback() {
        let mut e = entry("a", None);
        assert_eq!(e.author_name(), "Unknown");
        e.author = Some("Scribe".to_string());
        assert_eq!(e.author_name(), "Scribe");
    }
}
