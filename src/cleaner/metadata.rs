//! Document metadata extraction
//!
//! Reads the descriptive bits a readability pass does not return:
//! - Document language (`<html lang>`)
//! - Author (`meta[name=author]`, `[rel=author]`)
//! - Description (`meta[name=description]`, `og:description`)
//! - Site name (`og:site_name`)
//! - Page title (`og:title`, `<title>`)

use scraper::{Html, Selector};

/// Metadata declared by a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub byline: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub site_name: Option<String>,
}

/// Extracts metadata from an HTML document
///
/// # Example
///
/// ```
/// use pocket_scrapper::cleaner::extract_metadata;
///
/// let html = r#"<html lang="en"><head><title>Test</title></head><body></body></html>"#;
/// let meta = extract_metadata(html);
/// assert_eq!(meta.title, Some("Test".to_string()));
/// assert_eq!(meta.language, Some("en".to_string()));
/// ```
pub fn extract_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);

    PageMetadata {
        title: meta_content(&document, "meta[property='og:title']")
            .or_else(|| element_text(&document, "title")),
        byline: meta_content(&document, "meta[name='author']")
            .or_else(|| element_text(&document, "[rel='author']")),
        description: meta_content(&document, "meta[name='description']")
            .or_else(|| meta_content(&document, "meta[property='og:description']")),
        language: attribute(&document, "html[lang]", "lang"),
        site_name: meta_content(&document, "meta[property='og:site_name']"),
    }
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    attribute(document, selector, "content")
}

fn attribute(document: &Html, selector: &str, name: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;

    document
        .select(&selector)
        .filter_map(|element| element.value().attr(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn element_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}
