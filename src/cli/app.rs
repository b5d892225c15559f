//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};

use crate::domain::{EventId, Timestamp};
use crate::storage::{CatalogStore, Config};

use super::output::{Output, OutputFormat};
use super::{query, register};

#[derive(Parser)]
#[command(name = "seminars")]
#[command(author, version, about = "Seminar bookings: capacity, deadlines and prerequisites")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Directory holding events.jsonl and registrations.jsonl
    #[arg(long, global = true, env = "SEMINARS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Configuration file (defaults to seminars.toml in the data dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all events with their booking state
    List,

    /// Show the registration status of an event
    Status {
        /// Event id
        id: EventId,

        /// Evaluate at this Unix timestamp instead of now
        #[arg(long)]
        at: Option<Timestamp>,
    },

    /// Show the deadlines of an event
    Deadlines {
        /// Event id
        id: EventId,

        /// Evaluate at this Unix timestamp instead of now
        #[arg(long)]
        at: Option<Timestamp>,
    },

    /// Show prerequisite and dependent topics of an event
    Requirements {
        /// Event id
        id: EventId,
    },

    /// Register for an event
    Register {
        /// Event id
        id: EventId,

        /// Seats to book
        #[arg(long, default_value = "1")]
        seats: u32,

        /// Registrant key, checked against existing registrations
        #[arg(long)]
        attendee: Option<String>,

        /// Evaluate at this Unix timestamp instead of now
        #[arg(long)]
        at: Option<Timestamp>,
    },

    /// Cancel an event
    Cancel {
        /// Event id
        id: EventId,
    },

    /// Confirm an event
    Confirm {
        /// Event id
        id: EventId,
    },
}

/// Parses arguments and runs the selected command
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    let config = Config::load(cli.config.as_deref(), cli.data_dir.as_deref())?;
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    output.verbose(&format!("data dir: {}", data_dir.display()));

    let store = CatalogStore::new(&data_dir);
    let settings = config.registration;

    match cli.command {
        Commands::List => query::list(&store, &settings, &output),
        Commands::Status { id, at } => query::status(&store, &settings, id, now_or(at), &output),
        Commands::Deadlines { id, at } => {
            query::deadlines(&store, &settings, id, now_or(at), &output)
        }
        Commands::Requirements { id } => query::requirements(&store, id, &output),
        Commands::Register {
            id,
            seats,
            attendee,
            at,
        } => register::register(
            &store,
            &settings,
            id,
            seats,
            attendee.as_deref(),
            now_or(at),
            &output,
        ),
        Commands::Cancel { id } => {
            register::set_status(&store, id, register::StatusChange::Cancel, &output)
        }
        Commands::Confirm { id } => {
            register::set_status(&store, id, register::StatusChange::Confirm, &output)
        }
    }
}

/// Resolves "now": an explicit override or the wall clock. The domain
/// itself never reads a clock; it only ever sees this value.
fn now_or(at: Option<Timestamp>) -> Timestamp {
    at.unwrap_or_else(|| Utc::now().timestamp())
}
