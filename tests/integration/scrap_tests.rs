//! Integration tests for the scrapper
//!
//! These tests use wiremock to create mock HTTP servers and a stub cleaner
//! to exercise full scrap runs end-to-end.

use pocket_scrapper::{
    Article, Bookmark, CancellationToken, CleanError, Cleaner, FetchError, Item, ScrapError,
    Scrapper,
};
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Address nothing listens on (discard port)
const REFUSED_URL: &str = "http://127.0.0.1:9/a";

/// Cleaner that titles each article after its body, failing on chosen bodies
#[derive(Default)]
struct StubCleaner {
    failing: Vec<Vec<u8>>,
}

impl StubCleaner {
    fn failing_on(body: &[u8]) -> Self {
        Self {
            failing: vec![body.to_vec()],
        }
    }
}

impl Cleaner for StubCleaner {
    fn parse(&self, raw: &[u8], _base_url: &str) -> Result<Article, CleanError> {
        if self.failing.iter().any(|f| f == raw) {
            return Err(CleanError::Parse("stub refuses this body".to_string()));
        }

        let text = String::from_utf8_lossy(raw).to_string();
        Ok(Article {
            title: format!("title-{}", text),
            length: text.chars().count(),
            text,
            ..Default::default()
        })
    }
}

/// Log sink shared between a test and its fmt subscriber
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn lines_with(&self, needle: &str) -> Vec<String> {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Installs a capturing subscriber for the current thread
fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}

fn scrapper_with(cleaner: StubCleaner) -> Scrapper {
    Scrapper::with_cleaner(reqwest::Client::new(), Arc::new(cleaner))
}

async fn mount_body(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_slow(server: &MockServer, route: &str, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("slow")
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

fn bookmarks(entries: &[(&str, i64, &str, String)]) -> HashMap<String, Bookmark> {
    entries
        .iter()
        .map(|(key, id, title, url)| (key.to_string(), Bookmark::new(*id, *title, url.clone())))
        .collect()
}

fn find(items: &[Item], origin_id: i64) -> &Item {
    items
        .iter()
        .find(|i| i.origin_id == origin_id)
        .unwrap_or_else(|| panic!("no item with origin id {}", origin_id))
}

#[tokio::test]
async fn test_all_bookmarks_succeed() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    mount_body(&server, "/a", "X").await;
    mount_body(&server, "/b", "Y").await;

    let input = bookmarks(&[
        ("k1", 1, "A", format!("{}/a", base_url)),
        ("k2", 2, "B", format!("{}/b", base_url)),
    ]);

    let items = scrapper_with(StubCleaner::default())
        .scrap(&CancellationToken::new(), input)
        .await;

    assert_eq!(items.len(), 2);

    let a = find(&items, 1);
    assert_eq!(a.title, "A");
    assert_eq!(a.url, format!("{}/a", base_url));
    assert_eq!(a.raw_content, b"X");
    assert_eq!(a.article.as_ref().unwrap().title, "title-X");

    let b = find(&items, 2);
    assert_eq!(b.raw_content, b"Y");
    assert_eq!(b.article.as_ref().unwrap().title, "title-Y");

    assert!(items.iter().all(Item::is_complete));
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn test_one_fetch_fails() {
    let server = MockServer::start().await;
    mount_body(&server, "/b", "Y").await;

    let input = bookmarks(&[
        ("k1", 1, "A", REFUSED_URL.to_string()),
        ("k2", 2, "B", format!("{}/b", server.uri())),
    ]);

    let report = scrapper_with(StubCleaner::default())
        .scrap_with_report(&CancellationToken::new(), input)
        .await;

    assert_eq!(report.items.len(), 1);
    assert_eq!(report.items[0].origin_id, 2);

    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert!(failure.is_fetch());
    assert_ne!(failure.item_id(), report.items[0].id);
    assert!(failure.to_string().contains(failure.item_id()));
    assert!(matches!(
        failure,
        ScrapError::Fetch {
            source: FetchError::Request(_),
            ..
        }
    ));
}

#[tokio::test]
async fn test_one_extract_fails() {
    let server = MockServer::start().await;
    mount_body(&server, "/a", "X").await;
    mount_body(&server, "/b", "Y").await;

    let input = bookmarks(&[
        ("k1", 1, "A", format!("{}/a", server.uri())),
        ("k2", 2, "B", format!("{}/b", server.uri())),
    ]);

    let report = scrapper_with(StubCleaner::failing_on(b"X"))
        .scrap_with_report(&CancellationToken::new(), input)
        .await;

    assert_eq!(report.items.len(), 1);
    assert_eq!(report.items[0].origin_id, 2);

    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert!(failure.is_extract());
    assert!(failure.to_string().contains("stub refuses this body"));
    assert!(failure.to_string().contains(failure.item_id()));
}

#[tokio::test]
async fn test_slow_item_times_out() {
    let server = MockServer::start().await;
    mount_slow(&server, "/a", Duration::from_secs(5)).await;
    mount_body(&server, "/b", "Y").await;

    let input = bookmarks(&[
        ("k1", 1, "A", format!("{}/a", server.uri())),
        ("k2", 2, "B", format!("{}/b", server.uri())),
    ]);

    let scrapper =
        scrapper_with(StubCleaner::default()).with_item_timeout(Duration::from_millis(300));

    let start = Instant::now();
    let report = scrapper
        .scrap_with_report(&CancellationToken::new(), input)
        .await;

    assert!(start.elapsed() < Duration::from_secs(3));
    assert_eq!(report.items.len(), 1);
    assert_eq!(report.items[0].origin_id, 2);
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        report.failures[0],
        ScrapError::Fetch {
            source: FetchError::Timeout(_),
            ..
        }
    ));
}

#[tokio::test]
async fn test_empty_input() {
    let start = Instant::now();
    let report = scrapper_with(StubCleaner::default())
        .scrap_with_report(&CancellationToken::new(), HashMap::new())
        .await;

    assert!(report.items.is_empty());
    assert!(report.failures.is_empty());
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn test_cancellation_fails_every_item() {
    let server = MockServer::start().await;
    for route in ["/a", "/b", "/c"] {
        mount_slow(&server, route, Duration::from_secs(5)).await;
    }

    let input = bookmarks(&[
        ("k1", 1, "A", format!("{}/a", server.uri())),
        ("k2", 2, "B", format!("{}/b", server.uri())),
        ("k3", 3, "C", format!("{}/c", server.uri())),
    ]);

    let scope = CancellationToken::new();
    let canceller = scope.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let start = Instant::now();
    let report = scrapper_with(StubCleaner::default())
        .scrap_with_report(&scope, input)
        .await;

    assert!(start.elapsed() < Duration::from_secs(3));
    assert!(report.items.is_empty());
    assert_eq!(report.failures.len(), 3);
    assert!(report.failures.iter().all(|f| matches!(
        f,
        ScrapError::Fetch {
            source: FetchError::Cancelled,
            ..
        }
    )));

    let ids: HashSet<_> = report.failures.iter().map(|f| f.item_id()).collect();
    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn test_non_success_status_reaches_cleaner() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
        .mount(&server)
        .await;

    let input = bookmarks(&[("k1", 1, "Gone", format!("{}/gone", server.uri()))]);

    let items = scrapper_with(StubCleaner::default())
        .scrap(&CancellationToken::new(), input)
        .await;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].article.as_ref().unwrap().title, "title-missing");
}

#[tokio::test]
async fn test_empty_body_is_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let input = bookmarks(&[("k1", 1, "Empty", format!("{}/empty", server.uri()))]);

    let report = scrapper_with(StubCleaner::default())
        .scrap_with_report(&CancellationToken::new(), input)
        .await;

    assert!(report.items.is_empty());
    assert!(matches!(
        report.failures[0],
        ScrapError::Fetch {
            source: FetchError::EmptyBody,
            ..
        }
    ));
}

#[tokio::test]
async fn test_repeated_runs_agree_up_to_order() {
    let server = MockServer::start().await;
    let mut entries = Vec::new();
    for i in 0..8 {
        let route = format!("/page{}", i);
        mount_body(&server, &route, &format!("body{}", i)).await;
        entries.push((i, format!("{}{}", server.uri(), route)));
    }

    let input: HashMap<String, Bookmark> = entries
        .iter()
        .map(|(i, url)| (format!("k{}", i), Bookmark::new(*i, format!("T{}", i), url.clone())))
        .collect();

    let scrapper = scrapper_with(StubCleaner::failing_on(b"body3"));
    let scope = CancellationToken::new();

    let summarize = |items: Vec<Item>| {
        let mut rows: Vec<_> = items
            .into_iter()
            .map(|i| (i.origin_id, i.title, i.url, i.raw_content, i.article))
            .collect();
        rows.sort_by_key(|row| row.0);
        rows
    };

    let first = summarize(scrapper.scrap(&scope, input.clone()).await);
    let second = summarize(scrapper.scrap(&scope, input).await);

    assert_eq!(first.len(), 7);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_output_is_subset_of_input() {
    let server = MockServer::start().await;
    mount_body(&server, "/a", "X").await;
    mount_body(&server, "/b", "Y").await;

    let input = bookmarks(&[
        ("k1", 1, "A", format!("{}/a", server.uri())),
        ("k2", 2, "B", format!("{}/b", server.uri())),
        ("k3", 3, "C", REFUSED_URL.to_string()),
    ]);
    let expected: HashSet<(i64, String, String)> = input
        .values()
        .map(|b| (b.id, b.title.clone(), b.url.clone()))
        .collect();

    let items = scrapper_with(StubCleaner::default())
        .scrap(&CancellationToken::new(), input)
        .await;

    assert!(items.len() <= expected.len());
    let mut seen = HashSet::new();
    for item in &items {
        assert!(expected.contains(&(item.origin_id, item.title.clone(), item.url.clone())));
        assert!(seen.insert(item.origin_id), "bookmark scrapped twice");
        assert!(!item.raw_content.is_empty());
        assert!(item.article.is_some());
    }
}

#[tokio::test]
async fn test_readability_cleaner_end_to_end() {
    let server = MockServer::start().await;
    let html = r#"<html lang="en"><head><title>Fox Report</title>
        <meta name="author" content="Jane Doe"></head>
        <body><div id="content">
        <p>The quick brown fox jumps over the lazy dog, again and again, while the
        farmer watches from the porch and wonders why the dog never moves at all.</p>
        <p>Later that evening the fox returned, this time with friends, and the whole
        pack of them jumped over the sleeping dog until the moon was high in the sky.</p>
        </div></body></html>"#;

    Mock::given(method("GET"))
        .and(path("/fox"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;

    let input = bookmarks(&[("k1", 42, "Fox", format!("{}/fox", server.uri()))]);

    let items = Scrapper::new(reqwest::Client::new())
        .scrap(&CancellationToken::new(), input)
        .await;

    assert_eq!(items.len(), 1);
    let article = items[0].article.as_ref().unwrap();
    assert_eq!(article.title, "Fox Report");
    assert_eq!(article.byline.as_deref(), Some("Jane Doe"));
    assert!(article.text.contains("quick brown fox"));
}

#[tokio::test]
async fn test_each_failure_logged_once_with_prefix() {
    let (logs, _guard) = capture_logs();

    let scope = CancellationToken::new();
    scope.cancel();

    let input = bookmarks(&[
        ("k1", 1, "A", REFUSED_URL.to_string()),
        ("k2", 2, "B", REFUSED_URL.to_string()),
        ("k3", 3, "C", REFUSED_URL.to_string()),
    ]);

    let report = scrapper_with(StubCleaner::default())
        .scrap_with_report(&scope, input)
        .await;
    assert!(report.items.is_empty());

    let lines = logs.lines_with("could not scrap item: ");
    assert_eq!(lines.len(), 3);

    for failure in &report.failures {
        let matching: Vec<_> = lines
            .iter()
            .filter(|line| line.contains(failure.item_id()))
            .collect();
        assert_eq!(matching.len(), 1);
        assert!(matching[0].contains("request cancelled"));
    }
}

#[tokio::test]
async fn test_empty_input_logs_nothing() {
    let (logs, _guard) = capture_logs();

    let items = scrapper_with(StubCleaner::default())
        .scrap(&CancellationToken::new(), HashMap::new())
        .await;

    assert!(items.is_empty());
    assert!(logs.lines_with("could not scrap item").is_empty());
}
