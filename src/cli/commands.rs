//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Departure city
    #[arg(short, long)]
    pub from: String,

    /// Arrival city
    #[arg(short, long)]
    pub to: String,

    /// Travel date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: NaiveDate,

    /// Distance in kilometers (computed from coordinates if omitted)
    #[arg(long)]
    pub distance: Option<f64>,

    /// Flight time hours
    #[arg(long)]
    pub hours: Option<u32>,

    /// Flight time minutes
    #[arg(long)]
    pub minutes: Option<u32>,

    /// Skip the confirmation step and record immediately
    #[arg(short, long)]
    pub yes: bool,
}

impl AddCommand {
    /// Flight time in minutes, `None` when neither component was given.
    #[must_use]
    pub fn flight_time(&self) -> Option<u32> {
        match (self.hours, self.minutes) {
            (None, None) => None,
            (h, m) => Some(crate::duration::hm_to_minutes(
                h.unwrap_or(0),
                m.unwrap_or(0),
            )),
        }
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Maximum number of flights to show (0 for all)
    #[arg(short, long, default_value = "0")]
    pub limit: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Edit command arguments.
///
/// Omitted fields keep their stored values.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Id of the flight to edit
    pub id: i64,

    /// New departure city
    #[arg(short, long)]
    pub from: Option<String>,

    /// New arrival city
    #[arg(short, long)]
    pub to: Option<String>,

    /// New travel date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// New distance in kilometers (recomputed on a route change if omitted)
    #[arg(long)]
    pub distance: Option<f64>,

    /// New flight time hours (pass 0 hours and 0 minutes to clear)
    #[arg(long)]
    pub hours: Option<u32>,

    /// New flight time minutes
    #[arg(long)]
    pub minutes: Option<u32>,

    /// Skip the confirmation step and save immediately
    #[arg(short, long)]
    pub yes: bool,
}

impl EditCommand {
    /// Flight time in minutes, `None` when neither component was given.
    #[must_use]
    pub fn flight_time(&self) -> Option<u32> {
        match (self.hours, self.minutes) {
            (None, None) => None,
            (h, m) => Some(crate::duration::hm_to_minutes(
                h.unwrap_or(0),
                m.unwrap_or(0),
            )),
        }
    }
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Id of the flight to delete
    pub id: i64,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Clear command arguments.
#[derive(Debug, Args)]
pub struct ClearCommand {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Import command arguments.
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// Source to import from (e.g. an airline export file)
    pub source: Option<PathBuf>,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
///
/// Each flag declares its own default; there is no type-level default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
