//! Outbound sharing: feedback e-mails and character share links.

use chrono::NaiveDateTime;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

use crate::character::Character;
use crate::config::FeedbackConfig;
use crate::error::{DemplarError, Result};

pub const MAX_SUBJECT_LENGTH: usize = 100;
pub const MAX_MESSAGE_LENGTH: usize = 500;
const EMPTY_MESSAGE_PLACEHOLDER: &str = "[Please add your message here]";

/// Characters left unescaped by URI component encoding.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// A composed feedback e-mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl FeedbackMessage {
    /// Builds the message from user input.
    ///
    /// The subject is required; the message may be empty and is replaced by
    /// a placeholder. Both are trimmed before length checks.
    pub fn compose(
        config: &FeedbackConfig,
        subject: &str,
        message: &str,
        sent_at: NaiveDateTime,
    ) -> Result<Self> {
        let subject = subject.trim();
        let message = message.trim();

        if subject.is_empty() {
            return Err(DemplarError::validation(
                "Please enter a subject for your message!",
            ));
        }
        if subject.chars().count() > MAX_SUBJECT_LENGTH {
            return Err(DemplarError::validation(format!(
                "Subject must be at most {MAX_SUBJECT_LENGTH} characters"
            )));
        }
        if message.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(DemplarError::validation(format!(
                "Message must be at most {MAX_MESSAGE_LENGTH} characters"
            )));
        }

        let message = if message.is_empty() {
            EMPTY_MESSAGE_PLACEHOLDER
        } else {
            message
        };
        let body = format!(
            "Hello!\n\nSubject: {subject}\n\nMessage:\n{message}\n\nDetails:\n- Date: {date}\n- Time: {time}\n\nThank you!",
            date = sent_at.format("%-m/%-d/%Y"),
            time = sent_at.format("%-I:%M:%S %p"),
        );

        Ok(Self {
            to: config.email.clone(),
            subject: format!("{}: {subject}", config.subject_prefix),
            body,
        })
    }

    pub fn mailto_link(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.to,
            encode_component(&self.subject),
            encode_component(&self.body)
        )
    }

    /// Plain-text rendition for pasting when no mail client is available.
    pub fn plain_text(&self) -> String {
        format!("To: {}\nSubject: {}\n\n{}", self.to, self.subject, self.body)
    }
}

/// Text and link for sharing one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterShare {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl CharacterShare {
    pub fn new(character: &Character, site_url: &str) -> Self {
        Self {
            title: format!("{} - Demplar", character.name),
            text: format!(
                "Check out {} - Level {} {} from Demplar! ⚔️",
                character.name, character.level, character.class_name
            ),
            url: format!(
                "{}/?char={}",
                site_url.trim_end_matches('/'),
                encode_component(&character.id)
            ),
        }
    }

    /// Text and link on one line, for the clipboard.
    pub fn clipboard_text(&self) -> String {
        format!("{} {}", self.text, self.url)
    }
}
