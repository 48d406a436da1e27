//! Bookmark module for turning saved bookmarks into scrap items
//!
//! # Components
//!
//! - `Bookmark`: A record from the bookmark provider (origin id, title, URL)
//! - `parse_bookmarks`: Converts a bookmark mapping into a fresh item list
//! - `load_bookmarks`: Reads a bookmark mapping from a JSON export

mod loader;

pub use loader::load_bookmarks;

use crate::item::Item;
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

/// A bookmark as handed over by the bookmark provider
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Bookmark {
    /// Identifier assigned by the upstream provider
    pub id: i64,

    /// Human-readable title
    pub title: String,

    /// Address of the saved page
    pub url: String,
}

impl Bookmark {
    pub fn new(id: i64, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Converts a bookmark mapping into a list of pending items
///
/// The mapping keys are discarded. Every item gets a freshly generated v4
/// UUID, so ids are unique within a single call. Items come out in the
/// iteration order of the map, with no raw content and no article.
///
/// # Example
///
/// ```
/// use pocket_scrapper::bookmark::{parse_bookmarks, Bookmark};
/// use std::collections::HashMap;
///
/// let mut bookmarks = HashMap::new();
/// bookmarks.insert("k1".to_string(), Bookmark::new(1, "A", "http://a"));
///
/// let items = parse_bookmarks(bookmarks);
/// assert_eq!(items.len(), 1);
/// assert_eq!(items[0].origin_id, 1);
/// assert!(items[0].article.is_none());
/// ```
pub fn parse_bookmarks(bookmarks: HashMap<String, Bookmark>) -> Vec<Item> {
    bookmarks
        .into_values()
        .map(|bookmark| Item {
            id: Uuid::new_v4().to_string(),
            origin_id: bookmark.id,
            title: bookmark.title,
            url: bookmark.url,
            raw_content: Vec::new(),
            article: None,
        })
        .collect()
}
