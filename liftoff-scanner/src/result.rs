use crate::error::SkipReason;
use chrono::NaiveDate;

/// Summary fields read from one listing cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSummary {
    pub id: u64,
    pub date: NaiveDate,
    pub title_1: String,
    pub title_2: Option<String>,
    pub company: String,
    pub site: String,
    pub link: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionOutcome {
    Success,
    Failure,
    Unknown,
}

impl MissionOutcome {
    /// 1 for success, 0 for failure, `None` when unknown
    pub fn flag(&self) -> Option<u8> {
        match self {
            MissionOutcome::Success => Some(1),
            MissionOutcome::Failure => Some(0),
            MissionOutcome::Unknown => None,
        }
    }

    pub fn from_flag(flag: Option<u8>) -> Self {
        match flag {
            Some(1) => MissionOutcome::Success,
            Some(_) => MissionOutcome::Failure,
            None => MissionOutcome::Unknown,
        }
    }
}

/// Label/value attributes from a detail page. The label set is site-defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchDetail {
    pub id: u64,
    fields: Vec<(String, String)>,
    pub outcome: MissionOutcome,
}

impl LaunchDetail {
    pub fn empty(id: u64) -> Self {
        Self {
            id,
            fields: Vec::new(),
            outcome: MissionOutcome::Unknown,
        }
    }

    /// Insert or replace a label. Later values win, first position is kept.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();
        if let Some(slot) = self.fields.iter_mut().find(|(l, _)| *l == label) {
            slot.1 = value;
        } else {
            self.fields.push((label, value));
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(l, _)| l.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Summary and detail of one launch, joined on `id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRecord {
    pub summary: LaunchSummary,
    pub detail: LaunchDetail,
}

impl LaunchRecord {
    pub fn id(&self) -> u64 {
        self.summary.id
    }
}

/// A listing cell that yielded no record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCell {
    pub page: u32,
    /// Zero-based position of the cell in document order
    pub position: usize,
    pub reason: SkipReason,
}

/// Everything produced by one crawl run, in page then cell order
#[derive(Debug, Clone, Default)]
pub struct CrawlResult {
    pub total_pages: u32,
    pub pages_crawled: u32,
    pub records: Vec<LaunchRecord>,
    pub skipped: Vec<SkippedCell>,
}
