mod commands;
mod render;
mod when;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use eventcal_core::config::EventCalConfig;
use eventcal_core::{FilterMode, MonthView};

use crate::commands::session::Session;
use crate::render::Style;

#[derive(Parser)]
#[command(name = "eventcal")]
#[command(about = "Track events on a month calendar and filter them by past or upcoming")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of ~/.config/eventcal/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args, Default)]
struct MonthArgs {
    /// Month to show (1-12, defaults to the current month)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// Year to show (defaults to the current year)
    #[arg(short, long, value_parser = clap::value_parser!(i32).range(1..=9999))]
    year: Option<i32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive calendar session (the default)
    Session {
        #[command(flatten)]
        month: MonthArgs,

        /// Initial filter: all, past or upcoming
        #[arg(short, long)]
        filter: Option<FilterMode>,
    },
    /// Print a month grid
    Month {
        #[command(flatten)]
        month: MonthArgs,

        /// Print the grid as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the config file location and effective settings
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => EventCalConfig::config_path()?,
    };
    let config = EventCalConfig::load_from(&config_path)
        .with_context(|| format!("Could not load config from {}", config_path.display()))?;

    let style = Style {
        color: config.color && !cli.no_color,
        show_locations: config.show_locations,
    };

    match cli.command.unwrap_or(Commands::Session {
        month: MonthArgs::default(),
        filter: None,
    }) {
        Commands::Session { month, filter } => {
            let view = resolve_view(&month)?;
            let filter = filter.unwrap_or(config.default_filter);
            commands::session::run(Session::new(view, filter, style))
        }
        Commands::Month { month, json } => {
            commands::month::run(resolve_view(&month)?, json, &style)
        }
        Commands::Config => commands::config::run(&config_path, &config),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Month from the CLI (1-based) or the current one.
fn resolve_view(args: &MonthArgs) -> Result<MonthView> {
    let today = Local::now().date_naive();
    let year = args.year.unwrap_or(today.year());
    let month = args.month.unwrap_or(today.month());

    Ok(MonthView::new(year, month - 1)?)
}
