//! Pocket-Scrapper main entry point
//!
//! This is the command-line interface for the Pocket-Scrapper bookmark scrapper.

use anyhow::Context;
use clap::Parser;
use pocket_scrapper::bookmark::{load_bookmarks, Bookmark};
use pocket_scrapper::config::{load_config_with_hash, Config};
use pocket_scrapper::output::{generate_markdown_summary, print_statistics, RunStatistics};
use pocket_scrapper::scrapper::{build_http_client, Scrapper};
use pocket_scrapper::CancellationToken;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Pocket-Scrapper: readable snapshots of saved bookmarks
///
/// Pocket-Scrapper fetches every bookmarked page concurrently, extracts
/// the readable article from each one and writes a markdown summary.
#[derive(Parser, Debug)]
#[command(name = "pocket-scrapper")]
#[command(version = "1.0.0")]
#[command(about = "Readable snapshots of saved bookmarks", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Path to JSON bookmark file
    #[arg(value_name = "BOOKMARKS")]
    bookmarks: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate inputs and show what would be scrapped without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    let bookmarks = load_bookmarks(&cli.bookmarks)
        .with_context(|| format!("failed to load bookmarks {}", cli.bookmarks.display()))?;
    tracing::info!("Loaded {} bookmarks", bookmarks.len());

    if cli.dry_run {
        handle_dry_run(&config, &bookmarks);
        return Ok(());
    }

    handle_scrap(config, bookmarks).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pocket_scrapper=info,warn"),
            1 => EnvFilter::new("pocket_scrapper=debug,info"),
            2 => EnvFilter::new("pocket_scrapper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the configuration and the bookmarks
fn handle_dry_run(config: &Config, bookmarks: &HashMap<String, Bookmark>) {
    println!("=== Pocket-Scrapper Dry Run ===\n");

    println!("Scrapper Configuration:");
    println!(
        "  Per-item timeout: {}s",
        config.scrapper.item_timeout_secs
    );

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.name);
    println!("  Version: {}", config.user_agent.version);
    if let Some(contact_url) = &config.user_agent.contact_url {
        println!("  Contact URL: {}", contact_url);
    }

    println!("\nOutput:");
    println!("  Summary: {}", config.output.summary_path);

    let mut sorted: Vec<&Bookmark> = bookmarks.values().collect();
    sorted.sort_by_key(|b| b.id);

    println!("\nBookmarks ({}):", sorted.len());
    for bookmark in sorted {
        println!("  - [{}] {} <{}>", bookmark.id, bookmark.title, bookmark.url);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would scrap {} bookmarks", bookmarks.len());
}

/// Handles the main scrap operation
async fn handle_scrap(config: Config, bookmarks: HashMap<String, Bookmark>) -> anyhow::Result<()> {
    let total = bookmarks.len();

    let client =
        build_http_client(&config.user_agent).context("failed to build HTTP client")?;
    let scrapper = Scrapper::new(client).with_item_timeout(config.scrapper.item_timeout());

    // Ctrl-C cancels every in-flight fetch; the run still collects all reports
    let scope = CancellationToken::new();
    let interrupt = scope.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling in-flight requests");
            interrupt.cancel();
        }
    });

    tracing::info!("Starting scrap of {} bookmarks", total);
    let start_time = Instant::now();
    let report = scrapper.scrap_with_report(&scope, bookmarks).await;
    let stats = RunStatistics::from_report(total, &report, start_time.elapsed());

    print_statistics(&stats);

    let summary_path = Path::new(&config.output.summary_path);
    generate_markdown_summary(&report.items, &stats, summary_path)
        .with_context(|| format!("failed to write summary {}", summary_path.display()))?;
    println!("\n✓ Summary written to: {}", summary_path.display());

    Ok(())
}
