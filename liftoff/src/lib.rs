// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{parse_page_count_input, read_page_count, resolve_dir};

// Re-export crawl functionality from liftoff-core
pub use liftoff_core::crawl::{CrawlOptions, CrawlOutcome, CrawlProgressCallback, execute_crawl, generate_crawl_report};
