//! Command-line interface for flightlog.
//!
//! This module provides the CLI structure and command handlers for the
//! `fltlog` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ClearCommand, ConfigCommand, DeleteCommand, EditCommand, ImportCommand,
    ListCommand, OutputFormat, StatsCommand,
};

/// fltlog - Record your flight trips
///
/// A personal flight log that records trips between cities, computes
/// great-circle distances, and summarizes your travel history.
#[derive(Debug, Parser)]
#[command(name = "fltlog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new flight
    Add(AddCommand),

    /// List recorded flights, newest first
    List(ListCommand),

    /// Edit a recorded flight
    Edit(EditCommand),

    /// Delete a recorded flight
    Delete(DeleteCommand),

    /// Delete all recorded flights
    Clear(ClearCommand),

    /// Import flights from an external source
    Import(ImportCommand),

    /// Show travel statistics
    Stats(StatsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
