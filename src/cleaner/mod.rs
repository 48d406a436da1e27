//! Cleaner module for turning raw page bytes into readable articles
//!
//! The scrapper treats the cleaner as a black box with a single `parse`
//! operation. The default implementation runs a readability pass for the
//! main content and reads document metadata with an HTML selector pass.

mod metadata;
mod readable;

pub use metadata::{extract_metadata, PageMetadata};
pub use readable::ReadabilityCleaner;

use crate::item::Article;
use crate::CleanResult;

/// Extracts a readable article from raw page bytes
///
/// Implementations are shared by every worker of a scrap run, so they must
/// be safe for concurrent use. `parse` runs on a blocking thread.
pub trait Cleaner: Send + Sync {
    /// Parses `raw` into an article, resolving relative links against `base_url`
    fn parse(&self, raw: &[u8], base_url: &str) -> CleanResult<Article>;
}
