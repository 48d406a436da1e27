//! Markdown summary generation
//!
//! This module generates a human-readable markdown report of a scrap run:
//! the run statistics followed by one section per scrapped item.

use crate::item::Item;
use crate::output::stats::RunStatistics;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generates a markdown summary and writes it to `output_path`
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(
    items: &[Item],
    stats: &RunStatistics,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_summary(items, stats);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats the run as markdown
pub fn format_markdown_summary(items: &[Item], stats: &RunStatistics) -> String {
    let mut md = String::new();

    // Title
    md.push_str("# Pocket-Scrapper Summary\n\n");

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Bookmarks**: {}\n", stats.total));
    md.push_str(&format!("- **Scrapped**: {}\n", stats.scrapped));
    md.push_str(&format!("- **Fetch Failures**: {}\n", stats.fetch_failures));
    md.push_str(&format!(
        "- **Extract Failures**: {}\n",
        stats.extract_failures
    ));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n",
        stats.success_rate()
    ));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n\n",
        stats.elapsed.as_secs_f64()
    ));

    if items.is_empty() {
        md.push_str("No items were scrapped.\n");
        return md;
    }

    // Sort by origin id so reports of the same input are comparable
    let mut sorted: Vec<&Item> = items.iter().collect();
    sorted.sort_by_key(|item| item.origin_id);

    md.push_str("## Items\n\n");
    for item in sorted {
        format_item(&mut md, item);
    }

    md
}

fn format_item(md: &mut String, item: &Item) {
    let article = item.article.as_ref();
    let heading = article
        .map(|a| a.title.as_str())
        .filter(|t| !t.is_empty())
        .unwrap_or(item.title.as_str());

    md.push_str(&format!("### {}\n\n", heading));
    md.push_str(&format!("- **URL**: {}\n", item.url));
    md.push_str(&format!("- **Origin ID**: {}\n", item.origin_id));
    md.push_str(&format!("- **ID**: {}\n", item.id));
    md.push_str(&format!("- **Raw Size**: {} bytes\n", item.raw_content.len()));

    if let Some(article) = article {
        if let Some(byline) = &article.byline {
            md.push_str(&format!("- **Byline**: {}\n", byline));
        }
        if let Some(site_name) = &article.site_name {
            md.push_str(&format!("- **Site**: {}\n", site_name));
        }
        if let Some(language) = &article.language {
            md.push_str(&format!("- **Language**: {}\n", language));
        }
        md.push_str(&format!("- **Length**: {} characters\n", article.length));
        if let Some(excerpt) = &article.excerpt {
            md.push_str(&format!("\n> {}\n", excerpt));
        }
    }

    md.push('\n');
}
