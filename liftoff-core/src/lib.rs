pub mod charts;
pub mod config;
pub mod crawl;
pub mod error;
pub mod loader;
pub mod persist;
pub mod stats;
pub mod table;

pub use charts::Chart;
pub use config::DataPaths;
pub use error::{DataError, Result};
pub use table::LaunchTable;

use colored::Colorize;

const BANNER: &str = r#"
   __ _  ______         ______
  / /(_)/ __/ /_ ___   / __/ /_
 / // // _// __// _ \ / _// __/
/_//_//_/  \__/ \___//_/  \__/
"#;

pub fn print_banner() {
    println!("{}", BANNER.bright_cyan());
    println!(
        "  {} {}\n",
        "rocket launch scraper".dimmed(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
}
