use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;

use flock_config::{ConfigManager, ReportConfig};
use flock_core::{Clock, FixedClock, SystemClock};
use flock_dashboard::{utils::build_info, Dashboard, Result, Snapshot};
use flock_storage_json::JsonRecordProvider;

/// Membership dashboard reports over exported JSON record snapshots.
#[derive(Debug, Parser)]
#[command(
    name = "flock_report",
    about,
    version,
    long_version = build_info::LONG_VERSION
)]
struct Cli {
    /// Directory holding people.json, transactions.json and alerts.json.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Base directory for the configuration file (defaults to $FLOCK_HOME or ~/.flock).
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD) instead of today.
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Cohort counts plus birthdays and anniversaries for this week and month.
    Stats,
    /// Per-contributor totals over the rolling window.
    Contributors {
        /// Window length in months (overrides the configuration).
        #[arg(long)]
        months: Option<u32>,
        /// Qualifying category identifier (overrides the configuration).
        #[arg(long)]
        category: Option<String>,
    },
    /// Show or change the stored report settings.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
    Set { key: String, value: String },
}

#[derive(Serialize)]
struct Output<'a, T> {
    report: &'a T,
    provider_errors: &'a [String],
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let manager = match &cli.home {
        Some(base) => ConfigManager::with_base_dir(base.clone())?,
        None => ConfigManager::from_home()?,
    };
    let mut config = manager.load()?;
    flock_dashboard::init_with_filter(&config.log_filter);

    match cli.command {
        Command::Config { action } => {
            if let ConfigAction::Set { key, value } = action {
                config.set(&key, &value)?;
                manager.save(&config)?;
            }
            print_json(&config)
        }
        Command::Stats => match cli.today {
            Some(date) => print_stats(dashboard(&config, cli.data_dir, FixedClock::at_date(date))),
            None => print_stats(dashboard(&config, cli.data_dir, SystemClock)),
        },
        Command::Contributors { months, category } => {
            if let Some(months) = months {
                config.set("window_months", &months.to_string())?;
            }
            if let Some(category) = category {
                config.set("tithe_category", &category)?;
            }
            match cli.today {
                Some(date) => {
                    print_contributors(dashboard(&config, cli.data_dir, FixedClock::at_date(date)))
                }
                None => print_contributors(dashboard(&config, cli.data_dir, SystemClock)),
            }
        }
    }
}

fn dashboard<C: Clock>(
    config: &ReportConfig,
    data_dir: Option<PathBuf>,
    clock: C,
) -> Dashboard<JsonRecordProvider, C> {
    let dir = data_dir.unwrap_or_else(|| config.resolve_data_dir());
    let provider = JsonRecordProvider::new(dir).with_scope(config.scope_id);
    Dashboard::with_clock(provider, config.clone(), clock)
}

fn print_stats<C: Clock>(mut dashboard: Dashboard<JsonRecordProvider, C>) -> Result<()> {
    print_snapshot(&dashboard.stats())
}

fn print_contributors<C: Clock>(mut dashboard: Dashboard<JsonRecordProvider, C>) -> Result<()> {
    print_snapshot(&dashboard.contributors())
}

fn print_snapshot<T: Serialize>(snapshot: &Snapshot<T>) -> Result<()> {
    for error in &snapshot.provider_errors {
        eprintln!("warning: {error}");
    }
    print_json(&Output {
        report: snapshot.report.as_ref(),
        provider_errors: &snapshot.provider_errors,
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
