//! Pocket-Scrapper: readable snapshots of saved bookmarks
//!
//! This crate takes a set of bookmarks, fetches every page concurrently and
//! runs a readability cleaner over each body. Bookmarks that cannot be
//! fetched or cleaned are logged and dropped; a run never aborts because of
//! a single failure.

pub mod bookmark;
pub mod cleaner;
pub mod config;
pub mod item;
pub mod output;
pub mod scrapper;

use std::time::Duration;
use thiserror::Error;

/// Error for a single item, reported by a worker and logged by the coordinator
#[derive(Debug, Error)]
pub enum ScrapError {
    #[error("could not fetch page content for item '{id}': {source}")]
    Fetch { id: String, source: FetchError },

    #[error("could not extract article for item '{id}': {source}")]
    Extract { id: String, source: CleanError },
}

impl ScrapError {
    /// Returns the generated id of the item that failed
    pub fn item_id(&self) -> &str {
        match self {
            Self::Fetch { id, .. } | Self::Extract { id, .. } => id,
        }
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }

    pub fn is_extract(&self) -> bool {
        matches!(self, Self::Extract { .. })
    }
}

/// Errors raised while downloading a page body
#[derive(Debug, Error)]
pub enum FetchError {
    // The reqwest cause is rendered in the message only, not as `source()`
    #[error("could not fetch page: {0}")]
    Request(reqwest::Error),

    #[error("could not read response body: {0}")]
    Body(reqwest::Error),

    #[error("response body is empty")]
    EmptyBody,

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("request cancelled")]
    Cancelled,
}

/// Errors raised by a cleaner
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("could not parse article: {0}")]
    Parse(String),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] ::url::ParseError),

    #[error("cleaner task failed: {0}")]
    Worker(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while loading a bookmark file
#[derive(Debug, Error)]
pub enum BookmarkError {
    #[error("Failed to read bookmark file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse bookmarks: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid bookmark '{key}': {message}")]
    Validation { key: String, message: String },
}

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for cleaner operations
pub type CleanResult<T> = std::result::Result<T, CleanError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use bookmark::{load_bookmarks, parse_bookmarks, Bookmark};
pub use cleaner::{Cleaner, ReadabilityCleaner};
pub use config::Config;
pub use item::{Article, Item, ItemState};
pub use scrapper::{ScrapReport, Scrapper, DEFAULT_ITEM_TIMEOUT};
pub use tokio_util::sync::CancellationToken;
