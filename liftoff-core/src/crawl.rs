use crate::error::Result;
use crate::table::LaunchTable;
use indicatif::{ProgressBar, ProgressStyle};
use liftoff_scanner::result::SkippedCell;
use liftoff_scanner::{Crawler, Horizon, MissionOutcome};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Options for configuring a crawl operation
pub struct CrawlOptions {
    pub base_url: String,
    pub horizon: Horizon,
    /// Listing pages to crawl; 0 means every page the site reports
    pub page_limit: u32,
    /// Total per-request timeout; `None` leaves reqwest's default of no timeout
    pub timeout_secs: Option<u64>,
    /// Destination table, replaced when the crawl succeeds
    pub output: PathBuf,
    pub show_progress_bars: bool,
}

/// Callback for reporting crawl progress
pub type CrawlProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// What a finished crawl produced
#[derive(Debug)]
pub struct CrawlOutcome {
    pub horizon: Horizon,
    pub total_pages: u32,
    pub pages_crawled: u32,
    pub skipped: Vec<SkippedCell>,
    pub table: LaunchTable,
    pub output: PathBuf,
}

/// Crawl one horizon and write its table to `options.output`
pub async fn execute_crawl(
    options: CrawlOptions,
    progress_callback: Option<CrawlProgressCallback>,
) -> Result<CrawlOutcome> {
    let CrawlOptions {
        base_url,
        horizon,
        page_limit,
        timeout_secs,
        output,
        show_progress_bars,
    } = options;

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} pages {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        pb.set_message(format!("{} launches", horizon));
        Some(pb)
    } else {
        None
    };

    let mut crawler = Crawler::with_timeout(&base_url, timeout_secs)?;
    if let Some(ref pb) = progress_bar {
        let pb = pb.clone();
        crawler = crawler.with_progress_callback(Arc::new(move |page: u32, total: u32| {
            pb.set_length(u64::from(total));
            pb.set_position(u64::from(page.saturating_sub(1)));
        }));
    }

    if let Some(ref callback) = progress_callback {
        callback(format!("Crawling {} launches from {}", horizon, crawler.fetcher().base_url()));
    }

    let result = crawler.crawl(horizon, page_limit).await;
    let result = match result {
        Ok(result) => result,
        Err(e) => {
            if let Some(ref pb) = progress_bar {
                pb.abandon_with_message("crawl failed");
            }
            return Err(e.into());
        }
    };

    if let Some(ref pb) = progress_bar {
        pb.set_position(u64::from(result.pages_crawled));
        pb.finish_with_message(format!("{} launches collected", result.records.len()));
    }

    let table = LaunchTable::from_records(result.records);
    table.save(&output)?;

    if let Some(ref callback) = progress_callback {
        callback(format!("Saved {} launch(es) to {}", table.len(), output.display()));
    }

    Ok(CrawlOutcome {
        horizon,
        total_pages: result.total_pages,
        pages_crawled: result.pages_crawled,
        skipped: result.skipped,
        table,
        output,
    })
}

/// Generate a crawl report from an outcome
pub fn generate_crawl_report(outcome: &CrawlOutcome) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Horizon: {}\n", outcome.horizon));
    report.push_str(&format!(
        "  Pages crawled: {} of {}\n",
        outcome.pages_crawled, outcome.total_pages
    ));
    report.push_str(&format!("  Launches collected: {}\n", outcome.table.len()));
    report.push_str(&format!("  Detail columns: {}\n", outcome.table.detail_columns().len()));
    report.push_str(&format!("  Cells skipped: {}\n", outcome.skipped.len()));
    report.push_str(&format!("  Table: {}\n", outcome.output.display()));

    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    let (mut success, mut failure, mut unknown) = (0usize, 0usize, 0usize);
    for record in outcome.table.records() {
        match record.detail.outcome {
            MissionOutcome::Success => success += 1,
            MissionOutcome::Failure => failure += 1,
            MissionOutcome::Unknown => unknown += 1,
        }
    }
    report.push_str("## Outcomes\n");
    report.push_str(&format!("  \x1b[32m{}\x1b[0m success\n", success));
    report.push_str(&format!("  \x1b[31m{}\x1b[0m failure\n", failure));
    report.push_str(&format!("  \x1b[90m{}\x1b[0m without status\n", unknown));

    if !outcome.skipped.is_empty() {
        let mut by_reason: BTreeMap<&str, Vec<&SkippedCell>> = BTreeMap::new();
        for cell in &outcome.skipped {
            by_reason.entry(cell.reason.kind()).or_default().push(cell);
        }

        report.push_str("\n## Skipped cells\n");
        for (kind, cells) in by_reason {
            report.push_str(&format!("  \x1b[33m{}\x1b[0m {}\n", cells.len(), kind));
            for cell in cells {
                report.push_str(&format!(
                    "    page {} cell {}: {}\n",
                    cell.page, cell.position, cell.reason
                ));
            }
        }
    }

    report
}
