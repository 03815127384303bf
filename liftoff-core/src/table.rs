// Materialised launch table and its CSV form

use crate::error::{DataError, Result};
use crate::persist::write_atomic;
use chrono::{NaiveDate, NaiveDateTime};
use liftoff_scanner::{LaunchDetail, LaunchRecord, LaunchSummary, MissionOutcome, STATUS_KEY};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Fixed leading columns, in file order
pub const SUMMARY_COLUMNS: [&str; 7] = ["id", "date", "title_1", "title_2", "company", "site", "link"];

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Launch records plus the union of detail labels seen across them.
///
/// Detail columns are sorted so two crawls of the same pages produce the same
/// header. A record without a given label has no value for it; on disk that
/// is an empty cell.
#[derive(Debug, Clone, Default)]
pub struct LaunchTable {
    detail_columns: Vec<String>,
    records: Vec<LaunchRecord>,
}

impl LaunchTable {
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut labels = BTreeSet::new();
        for record in &records {
            for label in record.detail.labels() {
                if is_reserved(label) {
                    debug!("Launch {}: detail label '{}' clashes with a summary column", record.id(), label);
                    continue;
                }
                labels.insert(label.to_string());
            }
        }

        let detail_columns = labels.into_iter().collect();
        Self {
            detail_columns,
            records,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn detail_columns(&self) -> &[String] {
        &self.detail_columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.records.iter().map(|r| r.id())
    }

    /// Full header: summary columns, detail labels, then `status`
    pub fn headers(&self) -> Vec<&str> {
        SUMMARY_COLUMNS
            .iter()
            .copied()
            .chain(self.detail_columns.iter().map(String::as_str))
            .chain(std::iter::once(STATUS_KEY))
            .collect()
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(self.headers())?;

        for record in &self.records {
            let summary = &record.summary;
            let mut row: Vec<String> = vec![
                summary.id.to_string(),
                summary.date.format(DATE_FORMAT).to_string(),
                summary.title_1.clone(),
                summary.title_2.clone().unwrap_or_default(),
                summary.company.clone(),
                summary.site.clone(),
                summary.link.clone(),
            ];
            for column in &self.detail_columns {
                row.push(record.detail.get(column).unwrap_or_default().to_string());
            }
            row.push(
                record
                    .detail
                    .outcome
                    .flag()
                    .map(|f| f.to_string())
                    .unwrap_or_default(),
            );
            csv_writer.write_record(&row)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Write the table to `path`, replacing any previous file atomically
    pub fn save(&self, path: &Path) -> Result<()> {
        write_atomic(path, |file| self.write_csv(file))?;
        info!("Wrote {} launch(es) to {}", self.len(), path.display());
        Ok(())
    }

    pub fn read_csv<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let position = |name: &'static str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(DataError::MissingColumn(name))
        };

        let [id_col, date_col, title_1_col, title_2_col, company_col, site_col, link_col] = [
            position("id")?,
            position("date")?,
            position("title_1")?,
            position("title_2")?,
            position("company")?,
            position("site")?,
            position("link")?,
        ];
        let status_col = headers.iter().position(|h| h == STATUS_KEY);
        let detail_cols: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !is_reserved(h))
            .map(|(i, h)| (i, h.to_string()))
            .collect();

        let mut records = Vec::new();
        for (index, row) in csv_reader.records().enumerate() {
            let row = row?;
            let row_number = index + 1;
            let cell = |i: usize| row.get(i).unwrap_or("");

            let id = cell(id_col)
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid(row_number, "id", cell(id_col)))?;
            let date = parse_table_date(cell(date_col))
                .ok_or_else(|| invalid(row_number, "date", cell(date_col)))?;
            let title_2 = Some(cell(title_2_col))
                .filter(|t| !t.is_empty())
                .map(str::to_string);

            let mut detail = LaunchDetail::empty(id);
            for (i, label) in &detail_cols {
                let value = cell(*i);
                if !value.is_empty() {
                    detail.insert(label.clone(), value);
                }
            }
            if let Some(i) = status_col {
                detail.outcome = parse_status(cell(i))
                    .ok_or_else(|| invalid(row_number, "status", cell(i)))?;
            }

            records.push(LaunchRecord {
                summary: LaunchSummary {
                    id,
                    date,
                    title_1: cell(title_1_col).to_string(),
                    title_2,
                    company: cell(company_col).to_string(),
                    site: cell(site_col).to_string(),
                    link: cell(link_col).to_string(),
                },
                detail,
            });
        }

        debug!("Read {} row(s), {} detail column(s)", records.len(), detail_cols.len());
        Ok(Self {
            detail_columns: detail_cols.into_iter().map(|(_, l)| l).collect(),
            records,
        })
    }

    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| DataError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::read_csv(file)
    }
}

fn is_reserved(label: &str) -> bool {
    label == STATUS_KEY || SUMMARY_COLUMNS.contains(&label)
}

fn invalid(row: usize, column: &'static str, value: &str) -> DataError {
    DataError::InvalidValue {
        row,
        column,
        value: value.to_string(),
    }
}

/// Dates are written as `YYYY-MM-DD`; timestamps written by other tools
/// are accepted and truncated to the day.
pub fn parse_table_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// `1`/`0` flags; `1.0`/`0.0` appear when another tool rewrote the column as
/// floats. Empty means unknown.
fn parse_status(text: &str) -> Option<MissionOutcome> {
    let flag = match text.trim() {
        "" => None,
        "1" | "1.0" => Some(1),
        "0" | "0.0" => Some(0),
        _ => return None,
    };
    Some(MissionOutcome::from_flag(flag))
}
