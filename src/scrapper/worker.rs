//! Fetch-and-extract worker
//!
//! A worker owns exactly one item. It fetches the page under a scope bounded
//! by the caller's cancellation token and the per-item timeout, hands the
//! body to the cleaner, and reports the outcome on one of two channels.

use crate::cleaner::Cleaner;
use crate::item::{Article, Item, ItemState};
use crate::scrapper::fetcher::fetch_page_content;
use crate::{CleanError, CleanResult, FetchError, FetchResult, ScrapError};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Shared state every worker of a run needs
#[derive(Clone)]
pub(crate) struct Worker {
    client: Client,
    cleaner: Arc<dyn Cleaner>,
    item_timeout: Duration,
}

impl Worker {
    pub(crate) fn new(client: Client, cleaner: Arc<dyn Cleaner>, item_timeout: Duration) -> Self {
        Self {
            client,
            cleaner,
            item_timeout,
        }
    }

    pub(crate) fn item_timeout(&self) -> Duration {
        self.item_timeout
    }

    pub(crate) fn set_item_timeout(&mut self, item_timeout: Duration) {
        self.item_timeout = item_timeout;
    }

    /// Processes one item and sends exactly one report
    ///
    /// A completed item goes to `items`, a failure to `errors`. If the
    /// receiving side is gone the report is dropped.
    pub(crate) async fn process(
        self,
        scope: CancellationToken,
        item: Item,
        items: mpsc::Sender<Item>,
        errors: mpsc::Sender<ScrapError>,
    ) {
        let delivered = match self.run(&scope, item).await {
            Ok(item) => items.send(item).await.is_ok(),
            Err(err) => errors.send(err).await.is_ok(),
        };

        if !delivered {
            tracing::debug!("coordinator went away before the report was delivered");
        }
    }

    /// Runs fetch then extract for a single item
    pub(crate) async fn run(
        &self,
        scope: &CancellationToken,
        mut item: Item,
    ) -> Result<Item, ScrapError> {
        let mut state = ItemState::Pending;

        advance(&item, &mut state, ItemState::Fetching);
        let content = match self.fetch_scoped(scope, &item.url).await {
            Ok(content) => content,
            Err(source) => {
                advance(&item, &mut state, ItemState::Failed);
                return Err(ScrapError::Fetch {
                    id: item.id,
                    source,
                });
            }
        };
        item.raw_content = content;

        advance(&item, &mut state, ItemState::Extracting);
        let (raw_content, article) = self.extract(item.raw_content, item.url.clone()).await;
        item.raw_content = raw_content;
        match article {
            Ok(article) => item.article = Some(article),
            Err(source) => {
                advance(&item, &mut state, ItemState::Failed);
                return Err(ScrapError::Extract {
                    id: item.id,
                    source,
                });
            }
        }

        advance(&item, &mut state, ItemState::Done);
        Ok(item)
    }

    /// Fetches `url` until the caller's scope is cancelled or the timeout fires
    ///
    /// Whichever comes first drops the request future, aborting the
    /// in-flight connection.
    async fn fetch_scoped(&self, scope: &CancellationToken, url: &str) -> FetchResult<Vec<u8>> {
        let fetch = tokio::time::timeout(self.item_timeout, fetch_page_content(&self.client, url));

        tokio::select! {
            biased;
            _ = scope.cancelled() => Err(FetchError::Cancelled),
            result = fetch => result.unwrap_or_else(|_| Err(FetchError::Timeout(self.item_timeout))),
        }
    }

    /// Runs the cleaner on a blocking thread
    ///
    /// The cleaner is not bound by the per-item timeout. The body is moved
    /// into the task and handed back so the item can keep it.
    async fn extract(&self, raw_content: Vec<u8>, url: String) -> (Vec<u8>, CleanResult<Article>) {
        let cleaner = Arc::clone(&self.cleaner);
        let task = tokio::task::spawn_blocking(move || {
            let article = cleaner.parse(&raw_content, &url);
            (raw_content, article)
        });

        match task.await {
            Ok(outcome) => outcome,
            Err(e) => (Vec::new(), Err(CleanError::Worker(e.to_string()))),
        }
    }
}

fn advance(item: &Item, state: &mut ItemState, next: ItemState) {
    debug_assert!(
        state.can_transition_to(next),
        "invalid item transition {} -> {}",
        state,
        next
    );
    tracing::debug!("item {} ({}): {} -> {}", item.id, item.url, state, next);
    *state = next;
}
