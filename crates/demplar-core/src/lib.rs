pub mod catalog;
pub mod character;
pub mod config;
pub mod content;
pub mod error;
pub mod favorites;
pub mod news;
pub mod share;
pub mod snapshot;

// Re-export common error type
pub use error::{DemplarError, Result};
