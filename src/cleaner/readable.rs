//! Readability-backed cleaner

use crate::cleaner::metadata::extract_metadata;
use crate::cleaner::Cleaner;
use crate::item::Article;
use crate::{CleanError, CleanResult};
use url::Url;

/// Maximum length of an excerpt derived from the article text
const EXCERPT_CHARS: usize = 200;

/// Default cleaner built on the `readability` crate
///
/// The readability pass supplies the title, cleaned content and text; the
/// remaining article fields come from the page's own metadata. Bytes are
/// decoded as UTF-8, replacing invalid sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadabilityCleaner;

impl ReadabilityCleaner {
    pub fn new() -> Self {
        Self
    }
}

impl Cleaner for ReadabilityCleaner {
    fn parse(&self, raw: &[u8], base_url: &str) -> CleanResult<Article> {
        let base = Url::parse(base_url)?;
        let html = String::from_utf8_lossy(raw);

        let mut input = html.as_bytes();
        let product = readability::extractor::extract(&mut input, &base)
            .map_err(|e| CleanError::Parse(e.to_string()))?;

        let text = product.text.trim().to_string();
        if text.is_empty() {
            return Err(CleanError::Parse("no readable content".to_string()));
        }

        let metadata = extract_metadata(&html);

        let title = if product.title.trim().is_empty() {
            metadata.title.unwrap_or_default()
        } else {
            product.title.trim().to_string()
        };

        let excerpt = metadata
            .description
            .or_else(|| Some(derive_excerpt(&text)));

        Ok(Article {
            title,
            byline: metadata.byline,
            excerpt,
            language: metadata.language,
            site_name: metadata.site_name,
            content: product.content,
            length: text.chars().count(),
            text,
        })
    }
}

/// Takes the first sentence-sized chunk of `text`, collapsing whitespace
fn derive_excerpt(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(EXCERPT_CHARS).collect()
}
