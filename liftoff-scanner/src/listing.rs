use crate::dates::parse_launch_date;
use crate::detail::extract_detail;
use crate::error::{Result, SkipReason};
use crate::fetch::Fetcher;
use crate::result::{LaunchRecord, LaunchSummary, SkippedCell};
use crate::site::{
    CARD_TITLE_SELECTOR, CELL_SELECTOR, GRID_SELECTOR, Horizon, LINK_PREFIX,
    SUPPORTING_TEXT_SELECTOR, element_text, selector,
};
use scraper::{ElementRef, Html};
use tracing::{debug, info};

/// Outcome of parsing one listing cell
pub type CellOutcome = std::result::Result<LaunchSummary, SkipReason>;

/// Records and skipped cells of one listing page
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub page: u32,
    pub records: Vec<LaunchRecord>,
    pub skipped: Vec<SkippedCell>,
}

/// Fetch one listing page and enrich every parsed cell with its detail page.
///
/// A failure to fetch the listing itself is returned to the caller; cells
/// that cannot be parsed are skipped and reported in [`ListingPage::skipped`].
pub async fn extract_listing(fetcher: &Fetcher, page: u32, horizon: Horizon) -> Result<ListingPage> {
    let html = fetcher.fetch(&horizon.listing_path(page)).await?;
    let outcomes = parse_listing(&html, horizon);
    debug!("Page {} ({}): {} cell(s)", page, horizon, outcomes.len());

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for (position, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(summary) => {
                let detail = extract_detail(fetcher, summary.id).await;
                records.push(LaunchRecord { summary, detail });
            }
            Err(reason) => {
                debug!("Page {} cell {} skipped: {}", page, position, reason);
                skipped.push(SkippedCell {
                    page,
                    position,
                    reason,
                });
            }
        }
    }

    info!(
        "Page {} ({}): {} launch(es), {} skipped",
        page,
        horizon,
        records.len(),
        skipped.len()
    );

    Ok(ListingPage {
        page,
        records,
        skipped,
    })
}

/// Parse every launch cell of a listing page, in document order.
///
/// A page without the grid container, or with an empty grid, has no cells.
pub fn parse_listing(html: &str, horizon: Horizon) -> Vec<CellOutcome> {
    let document = Html::parse_document(html);

    let Some(grid) = document.select(&selector(GRID_SELECTOR)).next() else {
        return Vec::new();
    };

    let cell_selector = selector(CELL_SELECTOR);
    grid.select(&cell_selector)
        .map(|cell| parse_cell(cell, horizon))
        .collect()
}

fn parse_cell(cell: ElementRef<'_>, horizon: Horizon) -> CellOutcome {
    let title_block = cell
        .select(&selector(CARD_TITLE_SELECTOR))
        .next()
        .ok_or(SkipReason::MissingElement("card title"))?;
    let company = title_block
        .select(&selector("span"))
        .next()
        .ok_or(SkipReason::MissingElement("company"))?;
    let company = element_text(company)
        .replace('\n', "")
        .replace('\t', "")
        .trim()
        .to_string();

    let heading = cell
        .select(&selector("h5"))
        .next()
        .ok_or(SkipReason::MissingElement("title"))?;
    let (title_1, title_2) = split_title(&element_text(heading))?;

    let supporting = cell
        .select(&selector(SUPPORTING_TEXT_SELECTOR))
        .next()
        .ok_or(SkipReason::MissingElement("supporting text"))?;
    let supporting = element_text(supporting);
    let supporting = supporting.trim();

    let date_line = supporting.split('\n').next().unwrap_or("").replace("NET ", "");
    let date = parse_launch_date(&date_line)
        .ok_or_else(|| SkipReason::UnparsableDate(date_line.trim().to_string()))?;
    let site = extract_site(supporting, horizon)?;

    let onclick = cell
        .select(&selector("button"))
        .next()
        .ok_or(SkipReason::MissingElement("details button"))?
        .value()
        .attr("onclick")
        .ok_or(SkipReason::MissingElement("onclick"))?;
    let link = extract_link(onclick)?;
    let id = extract_id(&link)?;

    Ok(LaunchSummary {
        id,
        date,
        title_1,
        title_2: Some(title_2),
        company,
        site,
        link,
    })
}

/// Split a card heading `"Rocket | Mission"` into its two halves
pub fn split_title(title: &str) -> std::result::Result<(String, String), SkipReason> {
    let parts: Vec<&str> = title.trim().split(" | ").collect();
    match parts.as_slice() {
        [first, second] => Ok((first.to_string(), second.to_string())),
        _ => Err(SkipReason::TitleShape(parts.len())),
    }
}

/// Launch site from a card's supporting text.
///
/// Past cards print the site after the UTC timestamp; upcoming cards print it
/// on the third line.
pub fn extract_site(text: &str, horizon: Horizon) -> std::result::Result<String, SkipReason> {
    let raw = match horizon {
        Horizon::Past => text.split("UTC").nth(1),
        Horizon::Future => text.split('\n').nth(2),
    }
    .ok_or(SkipReason::MissingSite)?;

    Ok(raw.replace('\n', "").trim().to_string())
}

/// Detail path from a button click handler such as
/// `location.href = '/launches/details/5056'`
pub fn extract_link(onclick: &str) -> std::result::Result<String, SkipReason> {
    let tail = onclick
        .split(LINK_PREFIX)
        .nth(1)
        .ok_or_else(|| SkipReason::MalformedLink(onclick.to_string()))?;

    // drop the closing quote
    let mut chars = tail.chars();
    chars.next_back();
    Ok(chars.as_str().to_string())
}

/// Launch identifier: the integer after the last `details/`
pub fn extract_id(link: &str) -> std::result::Result<u64, SkipReason> {
    let tail = link.rsplit("details/").next().unwrap_or(link).trim();
    tail.parse()
        .map_err(|_| SkipReason::InvalidIdentifier(tail.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn cell(company: &str, title: &str, supporting: &str, onclick: &str) -> String {
        format!(
            r#"<div class="mdl-cell mdl-cell--6-col">
                <div class="mdl-card mdl-shadow--2dp">
                    <div class="mdl-card__title"><span>{company}</span><h5 class="header-style">{title}</h5></div>
                    <div class="mdl-card__supporting-text">{supporting}</div>
                    <div class="mdl-card__actions">
                        <button class="mdc-button" onclick="{onclick}">Details</button>
                    </div>
                </div>
            </div>"#
        )
    }

    fn page(cells: &[String]) -> String {
        format!(
            r#"<html><body><div class="mdl-grid">{}</div></body></html>"#,
            cells.concat()
        )
    }

    fn past_cell(title: &str) -> String {
        cell(
            "\n\t\tCASC\n\t",
            title,
            "\n  Sat Oct 15, 2022 01:12 UTC\n\n  Site 9401 (SLS-2), Jiuquan Satellite Launch Center, China\n",
            "location.href = '/launches/details/6077'",
        )
    }

    #[test]
    fn test_parse_past_cell() {
        let html = page(&[past_cell("Long March 2D | Yunhai-1 03")]);
        let outcomes = parse_listing(&html, Horizon::Past);
        assert_eq!(outcomes.len(), 1);

        let summary = outcomes[0].as_ref().unwrap();
        assert_eq!(summary.id, 6077);
        assert_eq!(summary.company, "CASC");
        assert_eq!(summary.title_1, "Long March 2D");
        assert_eq!(summary.title_2.as_deref(), Some("Yunhai-1 03"));
        assert_eq!(summary.date, NaiveDate::from_ymd_opt(2022, 10, 15).unwrap());
        assert_eq!(
            summary.site,
            "Site 9401 (SLS-2), Jiuquan Satellite Launch Center, China"
        );
        assert_eq!(summary.link, "/launches/details/6077");
    }

    #[test]
    fn test_parse_future_cell_uses_third_line() {
        let html = page(&[cell(
            "SpaceX",
            "Falcon Heavy | USSF-44",
            "NET Tue Nov 01, 2022\n\nLC-39A, Kennedy Space Center, Florida, USA\n",
            "location.href = '/launches/details/5620'",
        )]);
        let outcomes = parse_listing(&html, Horizon::Future);
        let summary = outcomes[0].as_ref().unwrap();

        assert_eq!(summary.date, NaiveDate::from_ymd_opt(2022, 11, 1).unwrap());
        assert_eq!(summary.site, "LC-39A, Kennedy Space Center, Florida, USA");
        assert_eq!(summary.id, 5620);
    }

    #[test]
    fn test_title_without_separator_is_skipped() {
        let html = page(&[
            past_cell("Soyuz 2.1a"),
            past_cell("Electron | Catch Me If You Can"),
        ]);
        let outcomes = parse_listing(&html, Horizon::Past);

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0], Err(SkipReason::TitleShape(1)));
        assert_eq!(outcomes[1].as_ref().unwrap().title_1, "Electron");
    }

    #[test]
    fn test_split_title() {
        assert_eq!(
            split_title(" Ariane 5 | JWST "),
            Ok(("Ariane 5".to_string(), "JWST".to_string()))
        );
        assert_eq!(split_title("A | B | C"), Err(SkipReason::TitleShape(3)));
        assert_eq!(split_title("A|B"), Err(SkipReason::TitleShape(1)));
    }

    #[test]
    fn test_missing_grid_yields_no_cells() {
        assert!(parse_listing("<html><body><p>Maintenance</p></body></html>", Horizon::Past).is_empty());
        assert!(parse_listing(r#"<div class="mdl-grid"></div>"#, Horizon::Past).is_empty());
    }

    #[test]
    fn test_missing_button_is_skipped() {
        let html = page(&[r#"<div class="mdl-cell">
            <div class="mdl-card__title"><span>ULA</span><h5>Atlas V 551 | ViaSat-3</h5></div>
            <div class="mdl-card__supporting-text">Sat Oct 15, 2022 01:12 UTC
            SLC-41, Cape Canaveral SFS, Florida, USA</div>
        </div>"#
            .to_string()]);
        let outcomes = parse_listing(&html, Horizon::Past);
        assert_eq!(
            outcomes[0],
            Err(SkipReason::MissingElement("details button"))
        );
    }

    #[test]
    fn test_past_site_requires_utc_marker() {
        assert_eq!(
            extract_site("Oct 2022\n\nMahia Peninsula, New Zealand", Horizon::Past),
            Err(SkipReason::MissingSite)
        );
    }

    #[test]
    fn test_future_cell_without_third_line_is_skipped() {
        let html = page(&[cell(
            "SpaceX",
            "Falcon 9 Block 5 | Starlink Group 4-36",
            "NET Tue Nov 01, 2022\nLC-39A, Kennedy Space Center, Florida, USA",
            "location.href = '/launches/details/5621'",
        )]);
        let outcomes = parse_listing(&html, Horizon::Future);
        assert_eq!(outcomes[0], Err(SkipReason::MissingSite));
    }

    #[tokio::test]
    async fn test_extract_listing_joins_detail_on_id() {
        use wiremock::{
            Mock, MockServer, ResponseTemplate,
            matchers::{method, path, query_param},
        };

        let server = MockServer::start().await;
        let second = cell(
            "Rocket Lab",
            "Electron | Owl for One",
            "\n  Fri Sep 16, 2022 00:00 UTC\n\n  Rocket Lab LC-1B, Mahia Peninsula, New Zealand\n",
            "location.href = '/launches/details/6078'",
        );
        Mock::given(method("GET"))
            .and(path("/launches/past/"))
            .and(query_param("page", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(page(&[past_cell("Long March 2D | Yunhai-1 03"), second])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/launches/details/6077"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<h6 class="status"><span>Success</span></h6>
                <div class="mdl-card__supporting-text">Mission</div>
                <div class="mdl-card__supporting-text"><div class="mdl-cell">Price: $3 million</div></div>"#,
            ))
            .mount(&server)
            .await;
        // no detail page for 6078

        let fetcher = Fetcher::new(&server.uri()).unwrap();
        let listing = extract_listing(&fetcher, 1, Horizon::Past).await.unwrap();

        assert_eq!(listing.records.len(), 2);
        assert!(listing.records.iter().all(|r| r.detail.id == r.summary.id));
        assert_eq!(listing.records[0].detail.get("Price"), Some("$3 million"));
        assert!(listing.records[1].detail.is_empty());
    }

    #[test]
    fn test_unparsable_date_is_skipped() {
        let html = page(&[cell(
            "Rocket Lab",
            "Electron | TBD",
            "TBD\n\nRocket Lab LC-1A, Mahia Peninsula, New Zealand",
            "location.href = '/launches/details/7001'",
        )]);
        let outcomes = parse_listing(&html, Horizon::Future);
        assert_eq!(outcomes[0], Err(SkipReason::UnparsableDate("TBD".to_string())));
    }

    #[test]
    fn test_extract_link_and_id() {
        let link = extract_link("location.href = '/launches/details/5056'").unwrap();
        assert_eq!(link, "/launches/details/5056");
        assert_eq!(extract_id(&link), Ok(5056));

        assert!(matches!(
            extract_link("window.open('/x')"),
            Err(SkipReason::MalformedLink(_))
        ));
        assert!(matches!(
            extract_id("/launches/details/abc"),
            Err(SkipReason::InvalidIdentifier(_))
        ));
    }
}
