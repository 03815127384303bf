// Launch dates as printed on listing cards
//
// Dates come in several precisions: "Sat Oct 15, 2022 05:22 UTC",
// "Mon Oct 31, 2022", "Oct 2022", "Q4 2022", "2023". Anything less precise
// than a day is pinned to the first day of the period.

use chrono::{NaiveDate, NaiveDateTime};

const DATE_TIME_FORMATS: &[&str] = &["%a %b %d, %Y %H:%M", "%b %d, %Y %H:%M"];
const DATE_FORMATS: &[&str] = &["%a %b %d, %Y", "%b %d, %Y", "%B %d, %Y", "%Y-%m-%d"];
const MONTH_FORMATS: &[&str] = &["%d %b %Y", "%d %B %Y"];

/// Parse a listing date. Returns `None` when no known format matches.
pub fn parse_launch_date(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    let text = text.strip_suffix("UTC").unwrap_or(text).trim();
    if text.is_empty() {
        return None;
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.date());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }

    let first_of_month = format!("1 {}", text);
    for format in MONTH_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&first_of_month, format) {
            return Some(date);
        }
    }

    if let Some(date) = parse_quarter(text) {
        return Some(date);
    }

    text.parse::<i32>()
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
}

fn parse_quarter(text: &str) -> Option<NaiveDate> {
    let (quarter, year) = text.split_once(' ')?;
    let quarter: u32 = quarter.strip_prefix('Q')?.parse().ok()?;
    if !(1..=4).contains(&quarter) {
        return None;
    }
    let year: i32 = year.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, (quarter - 1) * 3 + 1, 1)
}
