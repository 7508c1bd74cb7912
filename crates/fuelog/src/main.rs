//! fuelog - record fill-ups and track fuel efficiency
//!
//! Wires together configuration, the SQLite-backed record store, the
//! tracker and a terminal frontend, then runs exactly one command.

mod terminal;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fuelog_api::{Command, CommandOutcome, OutcomePayload};
use fuelog_config::{Settings, load_config_or_default};
use fuelog_core::{Controller, FuelTracker};
use fuelog_store::{KeyValueStore, SqliteStore};
use fuelog_util::{RecordId, default_config_path};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use terminal::{RawForm, TerminalFrontend, format_efficiency};

/// fuelog - personal fuel log
#[derive(Parser, Debug)]
#[command(name = "fuelog")]
#[command(about = "Record fill-ups and track fuel efficiency", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/fuelog/config.toml)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Data directory override (or set FUELOG_DATA_DIR env var)
    #[arg(short, long, env = "FUELOG_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Record a fill-up
    Add {
        /// Fill date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Odometer reading
        #[arg(long)]
        odometer: String,

        /// Fuel amount
        #[arg(long)]
        fuel: String,

        /// Total price paid
        #[arg(long)]
        price: String,

        /// The tank was not filled completely
        #[arg(long)]
        partial: bool,
    },

    /// Delete a record by ID
    Delete { id: RecordId },

    /// List records, newest first
    List,

    /// Show totals and efficiency statistics
    Stats,

    /// Write a JSON backup of all records
    Export {
        /// Directory the backup file is written to
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Replace all records with those from a JSON backup
    Import {
        file: PathBuf,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries command output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    debug!(version = env!("CARGO_PKG_VERSION"), "fuelog starting");

    let settings = load_config_or_default(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    let tracker = open_tracker(&args, &settings)?;
    let (frontend, command) = prepare(args.command, &settings)?;

    let mut controller = Controller::new(tracker, frontend);
    let outcome = controller.dispatch(command);

    Ok(report(&outcome, &settings))
}

fn open_tracker(args: &Args, settings: &Settings) -> Result<FuelTracker> {
    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(|| settings.storage.data_dir.clone());

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;

    let db_path = data_dir.join(&settings.storage.database);
    let backend: Arc<dyn KeyValueStore> = Arc::new(
        SqliteStore::open(&db_path)
            .with_context(|| format!("Failed to open database {:?}", db_path))?,
    );

    if !backend.is_healthy() {
        warn!(db_path = %db_path.display(), "Database health check failed");
    }

    info!(db_path = %db_path.display(), "Store initialized");

    FuelTracker::open(backend, settings).context("Failed to load records")
}

/// Configure the frontend for an action and translate it to a command
fn prepare(action: Action, settings: &Settings) -> Result<(TerminalFrontend, Command)> {
    let frontend = TerminalFrontend::new(settings.display.clone(), settings.efficiency.legacy_fills);

    let prepared = match action {
        Action::Add {
            date,
            odometer,
            fuel,
            price,
            partial,
        } => (
            frontend.with_form(RawForm {
                date,
                odometer,
                fuel_amount: fuel,
                price,
                full_tank: !partial,
            }),
            Command::SubmitForm,
        ),
        Action::Delete { id } => (frontend, Command::Delete { id }),
        Action::List => (frontend.show_list(), Command::Refresh),
        Action::Stats => (frontend.show_stats(), Command::Refresh),
        Action::Export { out } => (frontend.with_export_dir(out), Command::Export),
        Action::Import { file, yes } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read backup {:?}", file))?;
            (frontend.assume_yes(yes), Command::Import { contents })
        }
    };

    Ok(prepared)
}

/// Print what the frontend did not already show and pick the exit code
fn report(outcome: &CommandOutcome, settings: &Settings) -> ExitCode {
    match outcome {
        CommandOutcome::Ok(OutcomePayload::Added { record }) => {
            println!(
                "Recorded fill {} ({})",
                record.id,
                format_efficiency(
                    record.fuel_efficiency,
                    &settings.display.efficiency_unit(),
                    "efficiency not computable",
                )
            );
            ExitCode::SUCCESS
        }
        CommandOutcome::Ok(OutcomePayload::Deleted { id, removed }) => {
            if *removed {
                println!("Deleted record {}", id);
            } else {
                println!("No record with ID {}", id);
            }
            ExitCode::SUCCESS
        }
        CommandOutcome::Ok(OutcomePayload::ImportDeclined { .. }) => {
            println!("Import cancelled");
            ExitCode::SUCCESS
        }
        CommandOutcome::Ok(_) => ExitCode::SUCCESS,
        // Already shown through the frontend
        CommandOutcome::Err(_) => ExitCode::FAILURE,
    }
}
