//! HTTP fetcher implementation
//!
//! This module handles the HTTP side of a scrap run:
//! - Building the shared HTTP client with a proper user agent string
//! - GET requests that read the whole body into memory
//!
//! Status codes are not enforced: a non-2xx body is handed to the cleaner
//! like any other.

use crate::config::UserAgentConfig;
use crate::{FetchError, FetchResult};
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// The client is shared by every worker of a run. Per-item deadlines are
/// applied by the worker, so only the connect phase gets a timeout here.
///
/// # Example
///
/// ```no_run
/// use pocket_scrapper::config::UserAgentConfig;
/// use pocket_scrapper::scrapper::build_http_client;
///
/// let config = UserAgentConfig {
///     name: "PocketScrapper".to_string(),
///     version: "1.0".to_string(),
///     contact_url: Some("https://example.com/about".to_string()),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent(config))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Formats the user agent: `Name/Version (+ContactURL)`
pub fn user_agent(config: &UserAgentConfig) -> String {
    match &config.contact_url {
        Some(contact) => format!("{}/{} (+{})", config.name, config.version, contact),
        None => format!("{}/{}", config.name, config.version),
    }
}

/// Fetches a page and returns its raw body
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - The full, non-empty response body
/// * `Err(FetchError)` - Transport error, body read error, or empty body
pub async fn fetch_page_content(client: &Client, url: &str) -> FetchResult<Vec<u8>> {
    let response = client.get(url).send().await.map_err(FetchError::Request)?;

    let status = response.status();
    if !status.is_success() {
        tracing::debug!("HTTP {} from {}, passing body to cleaner", status, url);
    }

    let body = response.bytes().await.map_err(FetchError::Body)?;
    if body.is_empty() {
        return Err(FetchError::EmptyBody);
    }

    Ok(body.to_vec())
}
