pub mod crawler;
pub mod dates;
pub mod detail;
pub mod error;
pub mod fetch;
pub mod listing;
pub mod result;
pub mod site;

pub use crawler::{Crawler, ProgressCallback};
pub use error::{ScanError, SkipReason};
pub use fetch::Fetcher;
pub use result::{CrawlResult, LaunchDetail, LaunchRecord, LaunchSummary, MissionOutcome};
pub use site::{DEFAULT_BASE_URL, Horizon, STATUS_KEY};
