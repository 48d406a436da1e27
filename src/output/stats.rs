//! Statistics for a finished scrap run
//!
//! This module provides functionality for summarizing a scrap report and
//! displaying the numbers on stdout.

use crate::scrapper::ScrapReport;
use std::time::Duration;

/// Scrap run statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStatistics {
    /// Number of bookmarks handed to the run
    pub total: usize,

    /// Items that were fetched and cleaned
    pub scrapped: usize,

    /// Items dropped because the page could not be fetched
    pub fetch_failures: usize,

    /// Items dropped because the cleaner rejected the page
    pub extract_failures: usize,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunStatistics {
    /// Builds statistics from a scrap report
    pub fn from_report(total: usize, report: &ScrapReport, elapsed: Duration) -> Self {
        Self {
            total,
            scrapped: report.items.len(),
            fetch_failures: report.fetch_failures(),
            extract_failures: report.extract_failures(),
            elapsed,
        }
    }

    /// Items that were neither scrapped nor reported as failed
    pub fn unreported(&self) -> usize {
        self.total
            .saturating_sub(self.scrapped + self.fetch_failures + self.extract_failures)
    }

    /// Percentage of bookmarks that produced an item
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.scrapped as f64 / self.total as f64) * 100.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Scrap Statistics ===\n");

    println!("Overview:");
    println!("  Bookmarks: {}", stats.total);
    println!("  Scrapped: {}", stats.scrapped);
    println!("  Fetch failures: {}", stats.fetch_failures);
    println!("  Extract failures: {}", stats.extract_failures);
    if stats.unreported() > 0 {
        println!("  Unreported: {}", stats.unreported());
    }
    println!("  Elapsed: {:.2}s", stats.elapsed.as_secs_f64());
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} bookmarks scrapped)",
        stats.success_rate(),
        stats.scrapped,
        stats.total
    );
}
