//! News entries and their text formatting.

mod format;
mod model;

pub use format::{
    ContentBlock, PREVIEW_LENGTH, READING_TIME_THRESHOLD, WORDS_PER_MINUTE, format_content,
    preview, reading_time_minutes,
};
pub use model::{NewsBody, NewsEntry, TextBlock, sort_latest_first};
