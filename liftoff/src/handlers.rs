use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use colored::Colorize;
use liftoff_core::charts::render_all;
use liftoff_core::crawl::{CrawlOptions, CrawlOutcome, execute_crawl, generate_crawl_report};
use liftoff_core::{DataPaths, loader};
use liftoff_scanner::{DEFAULT_BASE_URL, Horizon};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const PAGE_PROMPT: &str =
    "How many pages would you like to scrape? 100 pages take around 20 minutes. Enter 0 to scrape them all:";

/// Parse a page count typed at the prompt
pub fn parse_page_count_input(input: &str) -> std::result::Result<u32, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Please enter a number".to_string());
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| format!("'{}' is not a page count", trimmed))
}

/// Ask for a page count until a valid one is given
pub fn read_page_count<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<u32> {
    loop {
        write!(output, "{} ", PAGE_PROMPT.bright_cyan().bold())?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("No page count given");
        }
        match parse_page_count_input(&line) {
            Ok(pages) => return Ok(pages),
            Err(e) => writeln!(output, "{} {}", "✗".red().bold(), e)?,
        }
    }
}

pub fn prompt_page_count() -> Result<u32> {
    read_page_count(io::stdin().lock(), io::stdout())
}

/// Expand a leading `~` in a directory argument
pub fn resolve_dir(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

async fn scrape(
    paths: &DataPaths,
    horizon: Horizon,
    page_limit: u32,
    base_url: String,
    timeout_secs: Option<u64>,
    show_progress_bars: bool,
) -> Result<CrawlOutcome> {
    let output = paths.table(horizon);

    println!("\n{} Scraping {} launches", "→".blue(), horizon.to_string().bright_white());
    println!("Site: {}", base_url);
    if page_limit == 0 {
        println!("Pages: all");
    } else {
        println!("Pages: {}", page_limit);
    }
    println!("Table: {}\n", output.display());

    let options = CrawlOptions {
        base_url,
        horizon,
        page_limit,
        timeout_secs,
        output,
        show_progress_bars,
    };
    let progress_callback = Arc::new(|msg: String| {
        println!("{}", msg);
    });

    let outcome = execute_crawl(options, Some(progress_callback))
        .await
        .context("Crawl failed")?;

    println!("\n{} Crawl complete!\n", "✓".green().bold());
    print!("{}", generate_crawl_report(&outcome));
    Ok(outcome)
}

fn chart(paths: &DataPaths, horizon: &str) -> Result<Vec<PathBuf>> {
    let table = loader::load_named(paths, horizon).context("Cannot load launch table")?;
    println!(
        "{} Loaded {} {} launch(es)",
        "✓".green().bold(),
        table.len().to_string().cyan(),
        horizon
    );

    let artifacts = render_all(&table, paths).context("Cannot render charts")?;
    for path in &artifacts {
        println!("  {} {}", "✓".green(), path.display().to_string().bright_white());
    }
    Ok(artifacts)
}

pub async fn handle_scrape(args: &ArgMatches) -> Result<()> {
    let horizon = if args.get_flag("future") {
        Horizon::Future
    } else {
        Horizon::Past
    };
    let pages = match args.get_one::<u32>("pages") {
        Some(pages) => *pages,
        None => prompt_page_count()?,
    };
    let base_url = args
        .get_one::<String>("base-url")
        .cloned()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let data_dir = args.get_one::<String>("data-dir").map(String::as_str).unwrap_or(".");
    let timeout = args.get_one::<u64>("timeout").copied();
    let show_progress = !args.get_flag("no-progress");

    let paths = DataPaths::new(resolve_dir(data_dir));
    scrape(&paths, horizon, pages, base_url, timeout, show_progress).await?;
    Ok(())
}

pub fn handle_charts(args: &ArgMatches) -> Result<()> {
    let horizon = args.get_one::<String>("horizon").map(String::as_str).unwrap_or("past");
    let data_dir = args.get_one::<String>("data-dir").map(String::as_str).unwrap_or(".");

    let mut paths = DataPaths::new(resolve_dir(data_dir));
    if let Some(out_dir) = args.get_one::<String>("out-dir") {
        paths = paths.with_chart_dir(resolve_dir(out_dir));
    }

    print_divider();
    println!("{}", "  CHARTS".bright_white().bold());
    print_divider();
    chart(&paths, horizon)?;
    Ok(())
}

/// Prompt for a page count, scrape past launches, then chart them
pub async fn run_interactive(data_dir: &Path) -> Result<()> {
    let paths = DataPaths::new(data_dir);
    let pages = prompt_page_count()?;

    scrape(&paths, Horizon::Past, pages, DEFAULT_BASE_URL.to_string(), None, true).await?;

    println!();
    print_divider();
    println!("{}", "  CHARTS".bright_white().bold());
    print_divider();
    chart(&paths, Horizon::Past.as_str())?;

    println!();
    print_divider();
    println!("  {}", "Thank you for using liftoff".bright_white().bold());
    print_divider();
    Ok(())
}
