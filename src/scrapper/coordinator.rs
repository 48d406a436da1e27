//! Scrapper coordinator - fan-out/fan-in over bookmark workers
//!
//! This module contains the public entry point of a scrap run:
//! - Turning the bookmark mapping into items
//! - Spawning one worker task per item
//! - Multiplexing the success and failure channels
//! - Logging failures and collecting completed items

use crate::bookmark::{parse_bookmarks, Bookmark};
use crate::cleaner::{Cleaner, ReadabilityCleaner};
use crate::item::Item;
use crate::scrapper::worker::Worker;
use crate::ScrapError;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Per-item deadline applied to every fetch
pub const DEFAULT_ITEM_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of a scrap run
#[derive(Debug, Default)]
pub struct ScrapReport {
    /// Completed items, in completion order
    pub items: Vec<Item>,

    /// Per-item failures, in the order they were logged
    pub failures: Vec<ScrapError>,
}

impl ScrapReport {
    /// Number of reports received (successes plus failures)
    pub fn total(&self) -> usize {
        self.items.len() + self.failures.len()
    }

    pub fn fetch_failures(&self) -> usize {
        self.failures.iter().filter(|e| e.is_fetch()).count()
    }

    pub fn extract_failures(&self) -> usize {
        self.failures.iter().filter(|e| e.is_extract()).count()
    }
}

/// Fetches bookmarked pages and extracts readable articles from them
///
/// The HTTP client is injected and shared by all workers; the cleaner is
/// shared too and must be safe for concurrent use.
///
/// # Example
///
/// ```no_run
/// use pocket_scrapper::{Bookmark, CancellationToken, Scrapper};
/// use std::collections::HashMap;
///
/// # async fn example() {
/// let scrapper = Scrapper::new(reqwest::Client::new());
///
/// let mut bookmarks = HashMap::new();
/// bookmarks.insert("k1".to_string(), Bookmark::new(1, "Rust", "https://www.rust-lang.org/"));
///
/// let items = scrapper.scrap(&CancellationToken::new(), bookmarks).await;
/// for item in items {
///     println!("{}: {} bytes", item.title, item.raw_content.len());
/// }
/// # }
/// ```
#[derive(Clone)]
pub struct Scrapper {
    worker: Worker,
}

impl Scrapper {
    /// Creates a scrapper with the readability cleaner and the default timeout
    pub fn new(client: Client) -> Self {
        Self::with_cleaner(client, Arc::new(ReadabilityCleaner::new()))
    }

    /// Creates a scrapper with a custom cleaner
    pub fn with_cleaner(client: Client, cleaner: Arc<dyn Cleaner>) -> Self {
        Self {
            worker: Worker::new(client, cleaner, DEFAULT_ITEM_TIMEOUT),
        }
    }

    /// Overrides the per-item fetch timeout
    pub fn with_item_timeout(mut self, item_timeout: Duration) -> Self {
        self.worker.set_item_timeout(item_timeout);
        self
    }

    pub fn item_timeout(&self) -> Duration {
        self.worker.item_timeout()
    }

    /// Scraps every bookmark and returns the completed items
    ///
    /// Failures are logged as `could not scrap item: <cause>` and dropped.
    /// The returned list is in completion order and never longer than the
    /// input. Cancelling `scope` makes in-flight fetches fail fast; the call
    /// still waits for every worker to report.
    pub async fn scrap(
        &self,
        scope: &CancellationToken,
        bookmarks: HashMap<String, Bookmark>,
    ) -> Vec<Item> {
        self.scrap_with_report(scope, bookmarks).await.items
    }

    /// Same as [`Scrapper::scrap`], also returning the logged failures
    pub async fn scrap_with_report(
        &self,
        scope: &CancellationToken,
        bookmarks: HashMap<String, Bookmark>,
    ) -> ScrapReport {
        let items = parse_bookmarks(bookmarks);
        let total = items.len();
        let mut report = ScrapReport::default();

        if total == 0 {
            return report;
        }

        let start_time = Instant::now();
        tracing::debug!("Spawning {} workers", total);

        let (item_tx, mut item_rx) = mpsc::channel::<Item>(1);
        let (err_tx, mut err_rx) = mpsc::channel::<ScrapError>(1);

        for item in items {
            let worker = self.worker.clone();
            tokio::spawn(worker.process(scope.clone(), item, item_tx.clone(), err_tx.clone()));
        }

        // Only workers hold senders from here on, so a closed pair of
        // channels means a worker died without reporting.
        drop(item_tx);
        drop(err_tx);

        for _ in 0..total {
            tokio::select! {
                Some(item) = item_rx.recv() => {
                    report.items.push(item);
                }
                Some(err) = err_rx.recv() => {
                    tracing::warn!("could not scrap item: {}", err);
                    report.failures.push(err);
                }
                else => {
                    tracing::error!(
                        "{} workers exited without reporting",
                        total - report.total()
                    );
                    break;
                }
            }
        }

        tracing::info!(
            "Scrapped {} of {} items in {:?}",
            report.items.len(),
            total,
            start_time.elapsed()
        );

        report
    }
}
