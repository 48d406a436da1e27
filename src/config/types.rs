use crate::scrapper::DEFAULT_ITEM_TIMEOUT;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Pocket-Scrapper
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scrapper: ScrapperConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Scrap run behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapperConfig {
    /// Per-item fetch timeout (seconds)
    #[serde(rename = "item-timeout-secs", default = "default_item_timeout_secs")]
    pub item_timeout_secs: u64,
}

impl ScrapperConfig {
    pub fn item_timeout(&self) -> Duration {
        Duration::from_secs(self.item_timeout_secs)
    }
}

impl Default for ScrapperConfig {
    fn default() -> Self {
        Self {
            item_timeout_secs: default_item_timeout_secs(),
        }
    }
}

fn default_item_timeout_secs() -> u64 {
    DEFAULT_ITEM_TIMEOUT.as_secs()
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the scrapper
    pub name: String,

    /// Version of the scrapper
    pub version: String,

    /// URL with information about the scrapper
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the markdown summary file
    #[serde(rename = "summary-path")]
    pub summary_path: String,
}
