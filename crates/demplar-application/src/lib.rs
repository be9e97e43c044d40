//! Application layer for Demplar.
//!
//! This crate provides use case implementations that coordinate between
//! domain and infrastructure layers: the catalog session, the news feed, the
//! in-memory news board and the admin panel.

pub mod admin;
pub mod catalog_session;
pub mod news_board;
pub mod news_feed;

pub use admin::{AdminPanel, CharacterField};
pub use catalog_session::{CatalogSession, CharacterProfile};
pub use news_board::NewsBoard;
pub use news_feed::{NewsArticle, NewsFeed};
