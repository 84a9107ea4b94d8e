use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use slate_core::{Task, build_planning_context};
use slate_ingest::{NormalizeOptions, SourceRecords, normalize_all};

mod config;

#[derive(Parser, Debug)]
#[command(name = "slate", version, about = "Academic schedule aggregation and daily planning")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default preferences file to ~/.slate/config.toml
    Init,

    /// Normalize already-fetched source records into the unified task list
    Normalize {
        /// JSON file with per-source record batches
        #[arg(long)]
        records: PathBuf,

        /// Reference instant (RFC 3339); defaults to the current time
        #[arg(long)]
        now: Option<String>,

        /// Weeks of recurring class schedule to expand
        #[arg(long, default_value_t = 4)]
        weeks: i64,

        /// Keep submitted/graded assignments
        #[arg(long)]
        include_completed: bool,
    },

    /// Build the daily planning context from a normalized task snapshot
    Plan {
        /// JSON file with an array of tasks
        #[arg(long)]
        tasks: PathBuf,

        /// Reference instant (RFC 3339); defaults to the current time
        #[arg(long)]
        now: Option<String>,

        /// Preferences TOML (defaults to ~/.slate/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Normalize, merge, and plan in one pass
    PlanDay {
        /// JSON file with per-source record batches
        #[arg(long)]
        records: PathBuf,

        /// Reference instant (RFC 3339); defaults to the current time
        #[arg(long)]
        now: Option<String>,

        /// Preferences TOML (defaults to ~/.slate/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Weeks of recurring class schedule to expand
        #[arg(long, default_value_t = 4)]
        weeks: i64,

        /// Keep submitted/graded assignments
        #[arg(long)]
        include_completed: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Init => config::init_config()?,

        Command::Normalize { records, now, weeks, include_completed } => {
            let now = parse_now(now.as_deref())?;
            let tasks = normalize(&records, now, weeks, include_completed)?;
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }

        Command::Plan { tasks, now, config } => {
            let now = parse_now(now.as_deref())?;
            let snapshot = read_tasks(&tasks)?;
            let preferences = config::load_preferences(config)?;
            let context = build_planning_context(&snapshot, now, &preferences);
            info!(
                day_load = context.summary.day_load.as_str(),
                risky = context.risky_tasks.len(),
                "planning context ready"
            );
            println!("{}", serde_json::to_string_pretty(&context)?);
        }

        Command::PlanDay { records, now, config, weeks, include_completed } => {
            let now = parse_now(now.as_deref())?;
            let tasks = normalize(&records, now, weeks, include_completed)?;
            let preferences = config::load_preferences(config)?;
            let context = build_planning_context(&tasks, now, &preferences);
            info!(
                day_load = context.summary.day_load.as_str(),
                due_today = context.summary.total_due_today,
                free_minutes = context.summary.free_block_minutes,
                "planning context ready"
            );
            println!("{}", serde_json::to_string_pretty(&context)?);
        }
    }

    Ok(())
}

/// The wall clock is read here and nowhere below this boundary.
fn parse_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        None => Ok(Utc::now()),
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("invalid --now timestamp '{s}'"))?
            .with_timezone(&Utc)),
    }
}

fn normalize(
    records_path: &PathBuf,
    now: DateTime<Utc>,
    weeks: i64,
    include_completed: bool,
) -> Result<Vec<Task>> {
    let raw = std::fs::read_to_string(records_path)
        .with_context(|| format!("read {}", records_path.display()))?;
    let records: SourceRecords =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", records_path.display()))?;

    let options = NormalizeOptions {
        weeks_of_schedule: weeks,
        include_completed,
    };
    let tasks = normalize_all(&records, now, &options);
    info!(
        assignments = records.assignments.len(),
        events = records.events.len(),
        schedule_entries = records.schedule.len(),
        manual = records.manual.len(),
        tasks = tasks.len(),
        "normalized source records"
    );
    Ok(tasks)
}

fn read_tasks(path: &PathBuf) -> Result<Vec<Task>> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}
