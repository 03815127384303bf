use crate::error::{Result, ScanError};
use crate::fetch::Fetcher;
use crate::listing::extract_listing;
use crate::result::CrawlResult;
use crate::site::{Horizon, PAGINATION_SELECTOR, selector};
use scraper::Html;
use std::sync::Arc;
use tracing::{debug, info};

/// Called before each listing page with `(page, pages_to_crawl)`
pub type ProgressCallback = Arc<dyn Fn(u32, u32) + Send + Sync>;

/// Sequential two-level crawler: listing pages, then one detail page per launch
pub struct Crawler {
    fetcher: Fetcher,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self::from_fetcher(Fetcher::new(base_url)?))
    }

    pub fn with_timeout(base_url: &str, timeout_secs: Option<u64>) -> Result<Self> {
        Ok(Self::from_fetcher(Fetcher::with_timeout(base_url, timeout_secs)?))
    }

    pub fn from_fetcher(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            progress_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    /// Number of listing pages the site currently offers for `horizon`
    pub async fn discover_page_count(&self, horizon: Horizon) -> Result<u32> {
        let html = self.fetcher.fetch(&horizon.listing_path(1)).await?;
        parse_page_count(&html)
    }

    /// Crawl listing pages `1..=n`, where `n` is `page_limit` when non-zero,
    /// otherwise every page the site reports.
    ///
    /// Any listing page failure aborts the crawl; per-launch problems only
    /// drop or thin out that launch.
    pub async fn crawl(&self, horizon: Horizon, page_limit: u32) -> Result<CrawlResult> {
        let total_pages = self.discover_page_count(horizon).await?;
        info!("{} launches: {} page(s) available", horizon, total_pages);

        let pages = if page_limit > 0 { page_limit } else { total_pages };
        info!("Crawling {} page(s) of {} launches", pages, horizon);

        let mut result = CrawlResult {
            total_pages,
            ..CrawlResult::default()
        };

        for page in 1..=pages {
            if let Some(ref callback) = self.progress_callback {
                callback(page, pages);
            }

            let listing = extract_listing(&self.fetcher, page, horizon).await?;
            result.records.extend(listing.records);
            result.skipped.extend(listing.skipped);
            result.pages_crawled = page;
        }

        info!(
            "Crawl complete. {} launch(es) from {} page(s), {} cell(s) skipped",
            result.records.len(),
            result.pages_crawled,
            result.skipped.len()
        );
        Ok(result)
    }
}

/// Read the last page number from the second raised pagination button.
///
/// Its click handler looks like `location.href = '?page=215'`, possibly with
/// further query parameters after the page number.
pub fn parse_page_count(html: &str) -> Result<u32> {
    let document = Html::parse_document(html);

    let button = document
        .select(&selector(PAGINATION_SELECTOR))
        .nth(1)
        .ok_or_else(|| ScanError::Pagination("no 'last page' button on page 1".to_string()))?;
    let onclick = button
        .value()
        .attr("onclick")
        .ok_or_else(|| ScanError::Pagination("'last page' button has no click handler".to_string()))?;

    let number = onclick
        .rsplit("?page=")
        .next()
        .unwrap_or(onclick)
        .split('&')
        .next()
        .unwrap_or("")
        .replace('\'', "");
    debug!("Pagination handler '{}' -> '{}'", onclick, number);

    number
        .trim()
        .parse()
        .map_err(|_| ScanError::Pagination(format!("cannot read page count from '{}'", onclick)))
}
