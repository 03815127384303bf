// Country and year aggregates behind the charts

use chrono::Datelike;
use liftoff_scanner::LaunchRecord;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Country of a launch site: its last `", "` separated segment.
///
/// `"Site 9401 (SLS-2), Jiuquan Satellite Launch Center, China"` gives
/// `"China"`; a site without a comma is its own country.
pub fn country_of(site: &str) -> &str {
    site.rsplit(", ").next().unwrap_or(site)
}

pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

fn year_of(record: &LaunchRecord) -> i32 {
    record.summary.date.year()
}

/// Launch count per country, most launches first. Ties are alphabetical.
pub fn launches_by_country(records: &[LaunchRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(country_of(&record.summary.site)).or_default() += 1;
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(country, n)| (country.to_string(), n))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

pub fn top_countries(records: &[LaunchRecord], n: usize) -> Vec<(String, usize)> {
    let mut counts = launches_by_country(records);
    counts.truncate(n);
    counts
}

pub fn launches_by_year(records: &[LaunchRecord]) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(year_of(record)).or_default() += 1;
    }
    counts
}

/// Launch counts of some countries split by decade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecadeBreakdown {
    pub countries: Vec<String>,
    /// Decades with at least one launch from `countries`, ascending
    pub decades: Vec<i32>,
    /// `counts[c][d]`: launches of `countries[c]` in `decades[d]`
    pub counts: Vec<Vec<usize>>,
}

pub fn decade_breakdown(records: &[LaunchRecord], countries: &[String]) -> DecadeBreakdown {
    let mut cells: HashMap<(&str, i32), usize> = HashMap::new();
    let mut decades = BTreeSet::new();

    for record in records {
        let country = country_of(&record.summary.site);
        if !countries.iter().any(|c| c == country) {
            continue;
        }
        let decade = decade_of(year_of(record));
        decades.insert(decade);
        *cells.entry((country, decade)).or_default() += 1;
    }

    let decades: Vec<i32> = decades.into_iter().collect();
    let counts = countries
        .iter()
        .map(|country| {
            decades
                .iter()
                .map(|d| cells.get(&(country.as_str(), *d)).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    DecadeBreakdown {
        countries: countries.to_vec(),
        decades,
        counts,
    }
}

/// Per-year and running launch totals of one country over a shared year axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearlySeries {
    pub country: String,
    pub per_year: Vec<usize>,
    pub cumulative: Vec<usize>,
}

/// Year axis (every year in which any of `countries` launched) and one
/// series per country. Years without launches count as zero.
pub fn yearly_series(records: &[LaunchRecord], countries: &[&str]) -> (Vec<i32>, Vec<YearlySeries>) {
    let mut cells: HashMap<(&str, i32), usize> = HashMap::new();
    let mut years = BTreeSet::new();

    for record in records {
        let country = country_of(&record.summary.site);
        if !countries.contains(&country) {
            continue;
        }
        let year = year_of(record);
        years.insert(year);
        *cells.entry((country, year)).or_default() += 1;
    }

    let years: Vec<i32> = years.into_iter().collect();
    let series = countries
        .iter()
        .map(|country| {
            let per_year: Vec<usize> = years
                .iter()
                .map(|y| cells.get(&(*country, *y)).copied().unwrap_or(0))
                .collect();
            let cumulative = per_year
                .iter()
                .scan(0, |total, n| {
                    *total += n;
                    Some(*total)
                })
                .collect();
            YearlySeries {
                country: country.to_string(),
                per_year,
                cumulative,
            }
        })
        .collect();

    (years, series)
}
