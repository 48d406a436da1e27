use crate::bookmark::Bookmark;
use crate::BookmarkError;
use std::collections::HashMap;
use std::path::Path;
use url::Url;

/// Loads a bookmark mapping from a JSON file
///
/// The file holds one object keyed by bookmark key:
///
/// ```json
/// {
///   "k1": { "id": 1, "title": "A", "url": "https://a.example/" }
/// }
/// ```
///
/// # Returns
///
/// * `Ok(HashMap<String, Bookmark>)` - Every bookmark has an absolute http(s) URL
/// * `Err(BookmarkError)` - Failed to read, parse, or validate the file
pub fn load_bookmarks(path: &Path) -> Result<HashMap<String, Bookmark>, BookmarkError> {
    let content = std::fs::read_to_string(path)?;
    let bookmarks: HashMap<String, Bookmark> = serde_json::from_str(&content)?;

    for (key, bookmark) in &bookmarks {
        validate_bookmark(key, bookmark)?;
    }

    Ok(bookmarks)
}

fn validate_bookmark(key: &str, bookmark: &Bookmark) -> Result<(), BookmarkError> {
    let url = Url::parse(&bookmark.url).map_err(|e| BookmarkError::Validation {
        key: key.to_string(),
        message: format!("invalid url '{}': {}", bookmark.url, e),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(BookmarkError::Validation {
            key: key.to_string(),
            message: format!("url scheme must be http or https, got '{}'", url.scheme()),
        });
    }

    Ok(())
}
