//! Scrapper module for fetching and cleaning bookmarked pages
//!
//! This module contains the core scrap logic, including:
//! - HTTP client construction and page fetching
//! - The per-item fetch-and-extract worker
//! - The coordinator that fans workers out and collects their reports

mod coordinator;
mod fetcher;
mod worker;

pub use coordinator::{ScrapReport, Scrapper, DEFAULT_ITEM_TIMEOUT};
pub use fetcher::{build_http_client, fetch_page_content, user_agent};
