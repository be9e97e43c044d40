//! Plain-text news formatting: paragraphs, bullet lists and rules.

use serde::Serialize;

/// Characters shown before an article is expanded.
pub const PREVIEW_LENGTH: usize = 300;
/// Bodies longer than this (in characters) show a reading time.
pub const READING_TIME_THRESHOLD: usize = 500;
pub const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "lines", rename_all = "camelCase")]
pub enum ContentBlock {
    /// Lines of one paragraph, rendered with hard line breaks.
    Paragraph(Vec<String>),
    /// Bullet items with the leading marker removed.
    Bullets(Vec<String>),
    Rule,
}

/// Splits text into blocks on blank lines.
///
/// A block consisting of `---` is a horizontal rule. A block whose first
/// character is `•` is a bullet list; its lines not starting with `•` are
/// dropped.
pub fn format_content(content: &str) -> Vec<ContentBlock> {
    split_paragraphs(content)
        .into_iter()
        .map(|paragraph| {
            let trimmed = paragraph.trim();
            if trimmed == "---" {
                ContentBlock::Rule
            } else if trimmed.starts_with('•') {
                let items = paragraph
                    .lines()
                    .map(str::trim)
                    .filter(|line| line.starts_with('•'))
                    .map(|line| line.trim_start_matches('•').trim_start().to_string())
                    .collect();
                ContentBlock::Bullets(items)
            } else {
                ContentBlock::Paragraph(paragraph.split('\n').map(str::to_string).collect())
            }
        })
        .collect()
}

/// Splits on runs of two or more newlines.
fn split_paragraphs(content: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = content;
    while let Some(start) = rest.find("\n\n") {
        let end = start + rest[start..].chars().take_while(|c| *c == '\n').count();
        parts.push(&rest[..start]);
        rest = &rest[end..];
    }
    parts.push(rest);
    parts
}

/// The first [`PREVIEW_LENGTH`] characters followed by `...`, or `None`
/// when the content is short enough to show in full.
pub fn preview(content: &str) -> Option<String> {
    if content.chars().count() <= PREVIEW_LENGTH {
        return None;
    }
    let head: String = content.chars().take(PREVIEW_LENGTH).collect();
    Some(format!("{head}..."))
}

/// Estimated minutes to read, or `None` for short bodies.
pub fn reading_time_minutes(content: &str) -> Option<usize> {
    if content.chars().count() <= READING_TIME_THRESHOLD {
        return None;
    }
    let words = content.split(' ').count();
    Some(words.div_ceil(WORDS_PER_MINUTE))
}
