//! News records as returned by the content store.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use demplar_core::news::{NewsBody, NewsEntry, TextBlock};

use super::character::RefRecord;

#[derive(Debug, Clone, Deserialize)]
pub struct SpanRecord {
    #[serde(default)]
    pub text: Option<String>,
}

/// A rich-text block. Only `_type == "block"` entries carry text.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord {
    #[serde(rename = "_type", default)]
    pub block_type: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub list_item: Option<String>,
    #[serde(default)]
    pub children: Vec<SpanRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BodyRecord {
    Text(String),
    Blocks(Vec<BlockRecord>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<RefRecord>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub body: Option<BodyRecord>,
}

impl NewsRecord {
    pub fn into_entry(self) -> NewsEntry {
        let published_at = self.published_at.as_deref().and_then(|raw| {
            match DateTime::parse_from_rfc3339(raw) {
                Ok(at) => Some(at.with_timezone(&Utc)),
                Err(e) => {
                    tracing::warn!("News '{}' has unreadable publish date '{}': {}", self.id, raw, e);
                    None
                }
            }
        });

        let body = match self.body {
            Some(BodyRecord::Text(text)) => NewsBody::Plain(text),
            Some(BodyRecord::Blocks(blocks)) => NewsBody::Blocks(
                blocks
                    .into_iter()
                    .filter(|b| b.block_type.as_deref().is_none_or(|t| t == "block"))
                    .map(|b| TextBlock {
                        style: b.style.unwrap_or_else(|| "normal".to_string()),
                        list_item: b.list_item,
                        spans: b.children.into_iter().filter_map(|s| s.text).collect(),
                    })
                    .collect(),
            ),
            None => NewsBody::default(),
        };

        NewsEntry {
            title: self.title.unwrap_or_default(),
            author: self
                .author
                .and_then(|a| a.name)
                .filter(|name| !name.trim().is_empty()),
            published_at,
            body,
            id: self.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_body() {
        let record: NewsRecord = serde_json::from_value(json!({
            "_id": "n1",
            "title": "Season Two",
            "author": {"_id": "a1", "name": "Scribe"},
            "publishedAt": "2024-05-01T10:00:00Z",
            "body": [
                {"_type": "block", "style": "normal", "children": [{"_type": "span", "text": "Welcome "}, {"_type": "span", "text": "back."}]},
                {"_type": "image", "asset": {"_ref": "img"}},
                {"_type": "block", "listItem": "bullet", "children": [{"text": "Raids"}]}
            ]
        }))
        .unwrap();

        let entry = record.into_entry();
        assert_eq!(entry.author_name(), "Scribe");
        assert!(entry.published_at.is_some());
        assert_eq!(entry.content(), "Welcome back.\n\n• Raids");
    }

    #[test]
    fn test_sparse_record() {
        let record: NewsRecord = serde_json::from_value(json!({
            "_id": "n2",
            "publishedAt": "yesterday"
        }))
        .unwrap();
        let entry = record.into_entry();
        assert_eq!(entry.title, "");
        assert_eq!(entry.author, None);
        assert_eq!(entry.published_at, None);
        assert_eq!(entry.content(), "");
    }

    #[test]
    fn test_plain_string_body() {
        let record: NewsRecord =
            serde_json::from_value(json!({"_id": "n3", "title": "T", "body": "Hello"})).unwrap();
        assert_eq!(record.into_entry().body, NewsBody::Plain("Hello".to_string()));
    }
}
