// Fixed layout of nextspaceflight.com: path templates and selectors

use scraper::{ElementRef, Selector};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_BASE_URL: &str = "https://nextspaceflight.com";

/// Reserved detail key holding the mission outcome flag
pub const STATUS_KEY: &str = "status";

pub(crate) const GRID_SELECTOR: &str = "div.mdl-grid";
pub(crate) const CELL_SELECTOR: &str = "div.mdl-cell";
pub(crate) const CARD_TITLE_SELECTOR: &str = "div.mdl-card__title";
pub(crate) const SUPPORTING_TEXT_SELECTOR: &str = "div.mdl-card__supporting-text";
pub(crate) const STATUS_SELECTOR: &str = "h6.status";
pub(crate) const PAGINATION_SELECTOR: &str = "button.mdc-button.mdc-button--raised";

/// Marker preceding the detail path in a card button's click handler
pub(crate) const LINK_PREFIX: &str = "location.href = '";

pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selectors are valid CSS")
}

/// Concatenated text of an element and all its descendants
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Which listing view a crawl or table refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Horizon {
    Past,
    Future,
}

impl Horizon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Horizon::Past => "past",
            Horizon::Future => "future",
        }
    }

    /// Listing page path for this horizon
    pub fn listing_path(&self, page: u32) -> String {
        match self {
            Horizon::Future => format!("/launches/?page={}", page),
            Horizon::Past => format!("/launches/past/?page={}", page),
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Horizon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "past" => Ok(Horizon::Past),
            "future" => Ok(Horizon::Future),
            other => Err(format!(
                "unknown horizon '{}', expected 'past' or 'future'",
                other
            )),
        }
    }
}

/// Detail page path for a launch
pub fn detail_path(id: u64) -> String {
    format!("/launches/details/{}", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_paths() {
        assert_eq!(Horizon::Future.listing_path(3), "/launches/?page=3");
        assert_eq!(Horizon::Past.listing_path(215), "/launches/past/?page=215");
    }

    #[test]
    fn test_detail_path() {
        assert_eq!(detail_path(5056), "/launches/details/5056");
    }

    #[test]
    fn test_horizon_from_str() {
        assert_eq!("Past".parse::<Horizon>(), Ok(Horizon::Past));
        assert_eq!("FUTURE".parse::<Horizon>(), Ok(Horizon::Future));
        assert!("Present".parse::<Horizon>().is_err());
    }
}
