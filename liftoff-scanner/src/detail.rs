use crate::error::{Result, ScanError};
use crate::fetch::Fetcher;
use crate::result::{LaunchDetail, MissionOutcome};
use crate::site::{
    CELL_SELECTOR, STATUS_KEY, STATUS_SELECTOR, SUPPORTING_TEXT_SELECTOR, detail_path,
    element_text, selector,
};
use scraper::Html;
use tracing::{debug, warn};

/// Fetch and parse the detail page of one launch.
///
/// Never fails: an unreachable or unrecognisable page yields an empty detail
/// so the launch is still recorded with its summary fields.
pub async fn extract_detail(fetcher: &Fetcher, id: u64) -> LaunchDetail {
    let html = match fetcher.fetch(&detail_path(id)).await {
        Ok(html) => html,
        Err(e) => {
            warn!("Detail page for launch {} unavailable: {}", id, e);
            return LaunchDetail::empty(id);
        }
    };

    match parse_detail(id, &html) {
        Ok(detail) => {
            debug!(
                "Launch {}: {} attribute(s), outcome {:?}",
                id,
                detail.len(),
                detail.outcome
            );
            detail
        }
        Err(e) => {
            warn!("Detail page for launch {} not parsed: {}", id, e);
            LaunchDetail::empty(id)
        }
    }
}

/// Extract attributes and mission outcome from a detail page.
///
/// The attribute grid is the second supporting-text block on the page; the
/// first one holds the mission description.
pub fn parse_detail(id: u64, html: &str) -> Result<LaunchDetail> {
    let document = Html::parse_document(html);

    let block = document
        .select(&selector(SUPPORTING_TEXT_SELECTOR))
        .nth(1)
        .ok_or_else(|| {
            ScanError::ParseError(format!("detail page {} has no attribute block", id))
        })?;

    let mut detail = LaunchDetail::empty(id);
    let cell_selector = selector(CELL_SELECTOR);
    for cell in block.select(&cell_selector) {
        let text = element_text(cell);
        match split_attribute(&text) {
            Some((label, value)) if label != STATUS_KEY => detail.insert(label, value),
            _ => debug!("Launch {}: skipping attribute cell '{}'", id, text.trim()),
        }
    }

    detail.outcome = parse_outcome(&document);
    Ok(detail)
}

/// Split `"Label: value"` into its two halves. Text with no separator, more
/// than one, or nothing before it, is not an attribute.
pub fn split_attribute(text: &str) -> Option<(&str, &str)> {
    let mut parts = text.trim().split(": ");
    let label = parts.next()?.trim();
    let value = parts.next()?;
    if parts.next().is_some() || label.is_empty() {
        return None;
    }
    Some((label, value.trim()))
}

fn parse_outcome(document: &Html) -> MissionOutcome {
    let Some(heading) = document.select(&selector(STATUS_SELECTOR)).next() else {
        return MissionOutcome::Unknown;
    };
    let Some(label) = heading.select(&selector("span")).next() else {
        return MissionOutcome::Unknown;
    };

    if element_text(label) == "Success" {
        MissionOutcome::Success
    } else {
        MissionOutcome::Failure
    }
}
