//! `slots` CLI: list labor and offerable appointment slots from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Every bookable slot on a date under the clinic's hours
//! slots labor --date 2026-03-18
//!
//! # Slots still free, given the ones already booked
//! slots offerable --date 2026-03-18 --occupied 08:00,14:00
//!
//! # Booked slots from a JSON array file, 12-hour display
//! slots offerable -d 2026-03-18 --occupied-file booked.json --twelve-hour
//!
//! # Full day schedule as JSON under a custom policy
//! slots offerable -d 2026-03-21 --policy part_time.json --json
//!
//! # Display a single slot
//! slots format 13:30
//! ```
//!
//! Logging goes to stderr and follows `RUST_LOG` (default `warn`);
//! `--verbose` forces `debug`.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use slot_engine::{BusinessHoursPolicy, OccupiedSlotSet, TimeSlot};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Clinic appointment slot availability"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine activity at debug level on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct DayArgs {
    /// Calendar date (YYYY-MM-DD, or YYYY-MM-DDT00:00:00)
    #[arg(short, long)]
    date: String,
    /// JSON business-hours policy file (defaults to the clinic's hours)
    #[arg(long)]
    policy: Option<String>,
    /// Print slots on the 12-hour clock
    #[arg(long, conflicts_with = "json")]
    twelve_hour: bool,
    /// Print JSON instead of one slot per line
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List every bookable slot on a date
    Labor {
        #[command(flatten)]
        day: DayArgs,
    },
    /// List the slots still free on a date
    Offerable {
        #[command(flatten)]
        day: DayArgs,
        /// Comma-separated booked slots (e.g. "08:00,14:00")
        #[arg(long)]
        occupied: Option<String>,
        /// JSON file holding an array of booked slots
        #[arg(long)]
        occupied_file: Option<String>,
    },
    /// Show a slot on the 12-hour clock
    Format {
        /// Slot in HH:MM form
        slot: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Labor { day } => {
            let date = slot_engine::parse_calendar_date(&day.date)?;
            let policy = load_policy(day.policy.as_deref())?;
            let slots = slot_engine::enumerate_labor_slots_with(&policy, date);

            if slots.is_empty() {
                info!(%date, "no labor slots, clinic closed");
            }
            if day.json {
                println!("{}", serde_json::to_string_pretty(&slots)?);
            } else {
                print_slots(&slots, day.twelve_hour);
            }
        }
        Commands::Offerable {
            day,
            occupied,
            occupied_file,
        } => {
            let date = slot_engine::parse_calendar_date(&day.date)?;
            let policy = load_policy(day.policy.as_deref())?;
            let occupied = collect_occupied(occupied.as_deref(), occupied_file.as_deref())?;

            if day.json {
                let schedule = slot_engine::day_schedule_with(&policy, date, &occupied);
                println!("{}", serde_json::to_string_pretty(&schedule)?);
            } else {
                let slots = slot_engine::compute_offerable_slots_with(&policy, date, &occupied);
                if slots.is_empty() {
                    info!(%date, "no offerable slots");
                }
                print_slots(&slots, day.twelve_hour);
            }
        }
        Commands::Format { slot } => {
            let slot: TimeSlot = slot.parse()?;
            println!("{}", slot_engine::format_twelve_hour(slot));
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_policy(path: Option<&str>) -> Result<BusinessHoursPolicy> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read policy file: {}", path))?;
            BusinessHoursPolicy::from_json(&json)
                .with_context(|| format!("Failed to load policy from {}", path))
        }
        None => Ok(BusinessHoursPolicy::clinic().clone()),
    }
}

/// Merge `--occupied` and `--occupied-file` entries into one set.
///
/// Empty items in the comma list are skipped, so `--occupied ""` means
/// nothing is booked.
fn collect_occupied(inline: Option<&str>, file: Option<&str>) -> Result<OccupiedSlotSet> {
    let mut entries: Vec<String> = Vec::new();

    if let Some(raw) = inline {
        for part in raw.split(',') {
            let trimmed = part.trim();
            if !trimmed.is_empty() {
                entries.push(trimmed.to_string());
            }
        }
    }

    if let Some(path) = file {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read occupied slots file: {}", path))?;
        let from_file: Vec<String> = serde_json::from_str(&json)
            .with_context(|| format!("Expected a JSON array of slots in {}", path))?;
        entries.extend(from_file);
    }

    slot_engine::parse_occupied(&entries).context("Failed to parse occupied slots")
}

fn print_slots(slots: &[TimeSlot], twelve_hour: bool) {
    for slot in slots {
        if twelve_hour {
            println!("{}", slot.to_twelve_hour());
        } else {
            println!("{}", slot);
        }
    }
}
