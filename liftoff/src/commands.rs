use crate::CLAP_STYLING;
use clap::{arg, command};
use liftoff_scanner::DEFAULT_BASE_URL;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("liftoff")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("liftoff")
        .about(
            "Scrape rocket launches into a table and chart them. Without a subcommand, asks how \
            many pages to scrape, then scrapes past launches and renders every chart.",
        )
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("scrape")
                .about("Crawl launch listings and their detail pages into a CSV table")
                .arg(
                    arg!(--"future")
                        .required(false)
                        .help("Scrape upcoming launches instead of past ones")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-p --"pages" <PAGES>)
                        .required(false)
                        .help("Number of listing pages to scrape, 0 for all of them (asked when omitted)")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(--"base-url" <URL>)
                        .required(false)
                        .help("Site to scrape")
                        .default_value(DEFAULT_BASE_URL),
                )
                .arg(
                    arg!(-d --"data-dir" <PATH>)
                        .required(false)
                        .help("Directory the table is written to")
                        .default_value("."),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds (default: none)")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--"no-progress")
                        .required(false)
                        .help("Do not draw a progress bar")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("charts")
                .about("Render charts from a previously scraped table")
                .arg(
                    arg!(--"horizon" <HORIZON>)
                        .required(false)
                        .help("Which table to chart")
                        .value_parser(["past", "future"])
                        .default_value("past"),
                )
                .arg(
                    arg!(-d --"data-dir" <PATH>)
                        .required(false)
                        .help("Directory holding the table")
                        .default_value("."),
                )
                .arg(
                    arg!(-o --"out-dir" <PATH>)
                        .required(false)
                        .help("Directory the charts are written to (default: the data directory)"),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        command_argument_builder().debug_assert();
    }

    #[test]
    fn test_scrape_defaults() {
        let matches = command_argument_builder()
            .try_get_matches_from(["liftoff", "scrape"])
            .unwrap();
        let (name, scrape) = matches.subcommand().unwrap();
        assert_eq!(name, "scrape");
        assert!(!scrape.get_flag("future"));
        assert_eq!(scrape.get_one::<u32>("pages"), None);
        assert_eq!(scrape.get_one::<u64>("timeout"), None);
        assert_eq!(
            scrape.get_one::<String>("base-url").map(String::as_str),
            Some(DEFAULT_BASE_URL)
        );
    }

    #[test]
    fn test_charts_rejects_unknown_horizon() {
        let result = command_argument_builder().try_get_matches_from(["liftoff", "charts", "--horizon", "present"]);
        assert!(result.is_err());
    }
}
