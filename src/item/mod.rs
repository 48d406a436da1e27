//! Item module for scrap records
//!
//! # Components
//!
//! - `Item`: A bookmark paired with its fetched bytes and extracted article
//! - `Article`: The readable representation produced by a cleaner
//! - `ItemState`: Tracks an item through fetching and extraction

mod state;

pub use state::ItemState;

/// A working and output record for one bookmark
///
/// Items are created by [`crate::bookmark::parse_bookmarks`] and filled in
/// by exactly one worker. Only complete items leave a scrap run.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Generated identifier, unique within a scrap run
    pub id: String,

    /// Identifier of the bookmark at the provider
    pub origin_id: i64,

    /// Bookmark title
    pub title: String,

    /// Bookmark URL, also used as base URL by the cleaner
    pub url: String,

    /// Raw response body
    pub raw_content: Vec<u8>,

    /// Readable article extracted from `raw_content`
    pub article: Option<Article>,
}

impl Item {
    /// Returns true once both the body and the article are populated
    pub fn is_complete(&self) -> bool {
        !self.raw_content.is_empty() && self.article.is_some()
    }
}

/// Readable article extracted from a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    /// Article title
    pub title: String,

    /// Author line, if the page declares one
    pub byline: Option<String>,

    /// Short summary of the article
    pub excerpt: Option<String>,

    /// Document language (from `<html lang>`)
    pub language: Option<String>,

    /// Name of the publishing site
    pub site_name: Option<String>,

    /// Cleaned main-content HTML
    pub content: String,

    /// Main content as plain text
    pub text: String,

    /// Length of `text` in characters
    pub length: usize,
}
