use colored::Colorize;
use commands::command_argument_builder;
use liftoff::handlers::{handle_charts, handle_scrape, run_interactive};
use liftoff_core::config::DEFAULT_DATA_DIR;
use liftoff_core::print_banner;
use std::path::Path;
use tracing::Level;

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    tracing_subscriber::fmt()
        .with_max_level(if quiet { Level::WARN } else { Level::INFO })
        .with_target(false)
        .init();

    let result = match chosen_command.subcommand() {
        None => run_interactive(Path::new(DEFAULT_DATA_DIR)).await,
        Some(("scrape", primary_command)) => handle_scrape(primary_command).await,
        Some(("charts", primary_command)) => handle_charts(primary_command),
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
