//! `fltlog` - CLI for flightlog
//!
//! This binary provides the command-line interface for recording flight
//! trips and reviewing travel statistics.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Result;
use clap::Parser;

use flightlog::cli::{
    AddCommand, Cli, Command, ConfigCommand, DeleteCommand, EditCommand, ImportCommand,
    ListCommand, OutputFormat, StatsCommand,
};
use flightlog::geocode::{Geocoder, StaticGeocoder};
use flightlog::trips::{FlightInput, TripLog};
use flightlog::{init_logging, Config, FlightRecord};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Add(cmd) => {
            let mut log = TripLog::open(config.database_path())?;
            handle_add(&mut log, &build_geocoder(&config), &cmd)
        }
        Command::List(cmd) => {
            let log = TripLog::open(config.database_path())?;
            handle_list(&log, &cmd)
        }
        Command::Edit(cmd) => {
            let mut log = TripLog::open(config.database_path())?;
            handle_edit(&mut log, &build_geocoder(&config), &cmd)
        }
        Command::Delete(cmd) => {
            let mut log = TripLog::open(config.database_path())?;
            handle_delete(&mut log, &cmd)
        }
        Command::Clear(cmd) => {
            let mut log = TripLog::open(config.database_path())?;
            handle_clear(&mut log, cmd.yes)
        }
        Command::Import(cmd) => {
            handle_import(&cmd);
            Ok(())
        }
        Command::Stats(cmd) => {
            let log = TripLog::open(config.database_path())?;
            handle_stats(&log, &cmd)
        }
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// Build the geocoder from the built-in table plus configured cities.
fn build_geocoder(config: &Config) -> StaticGeocoder {
    let mut geocoder = StaticGeocoder::with_builtin_cities();
    for (name, coords) in &config.geocoder.cities {
        geocoder.insert(name, *coords);
    }
    geocoder
}

fn handle_add(log: &mut TripLog, geocoder: &dyn Geocoder, cmd: &AddCommand) -> Result<()> {
    let input = FlightInput {
        departure_city: cmd.from.clone(),
        arrival_city: cmd.to.clone(),
        date: cmd.date,
        distance_km: cmd.distance,
        flight_time: cmd.flight_time(),
    };

    let staged = log.stage(&input, geocoder)?;
    print_record(staged.record());

    if !cmd.yes {
        println!();
        println!("Nothing recorded. Use --yes to record this flight.");
        return Ok(());
    }

    let record = log.commit_add(staged)?;
    println!();
    if let Some(id) = record.id {
        println!("Recorded flight #{id}.");
    }
    Ok(())
}

fn handle_list(log: &TripLog, cmd: &ListCommand) -> Result<()> {
    let records = log.records();
    let shown = if cmd.limit > 0 && cmd.limit < records.len() {
        &records[..cmd.limit]
    } else {
        records
    };

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(shown)?),
        OutputFormat::Table => print_table(shown),
        OutputFormat::Plain => {
            for record in shown {
                println!(
                    "#{} {} {} {:.2} km ({})",
                    record.id.unwrap_or(0),
                    record.date,
                    record.route(),
                    record.distance_km,
                    record.formatted_flight_time(),
                );
            }
        }
    }

    if shown.is_empty() {
        println!("No flights recorded yet.");
    } else if shown.len() < records.len() {
        println!();
        println!("Showing {} of {} flights.", shown.len(), records.len());
    }
    Ok(())
}

fn handle_edit(log: &mut TripLog, geocoder: &dyn Geocoder, cmd: &EditCommand) -> Result<()> {
    let existing = log
        .find(cmd.id)
        .ok_or(flightlog::Error::FlightNotFound { id: cmd.id })?;

    // Omitted fields keep the stored values.
    let input = FlightInput {
        departure_city: cmd
            .from
            .clone()
            .unwrap_or_else(|| existing.departure_city.clone()),
        arrival_city: cmd
            .to
            .clone()
            .unwrap_or_else(|| existing.arrival_city.clone()),
        date: cmd.date.unwrap_or(existing.date),
        distance_km: cmd.distance,
        flight_time: cmd.flight_time(),
    };

    let staged = log.stage_edit(cmd.id, &input, geocoder)?;
    print_record(staged.record());

    if !cmd.yes {
        println!();
        println!("Nothing saved. Use --yes to save these changes.");
        return Ok(());
    }

    log.commit_update(staged)?;
    println!();
    println!("Updated flight #{}.", cmd.id);
    Ok(())
}

fn handle_delete(log: &mut TripLog, cmd: &DeleteCommand) -> Result<()> {
    let record = log
        .find(cmd.id)
        .ok_or(flightlog::Error::FlightNotFound { id: cmd.id })?;
    print_record(record);

    if !cmd.yes {
        println!();
        println!("Nothing deleted. Use --yes to delete this flight.");
        return Ok(());
    }

    log.remove(cmd.id)?;
    println!();
    println!("Deleted flight #{}.", cmd.id);
    Ok(())
}

fn handle_clear(log: &mut TripLog, yes: bool) -> Result<()> {
    let count = log.records().len();
    if count == 0 {
        println!("No flights recorded yet.");
        return Ok(());
    }

    if !yes {
        println!("This will delete all {count} recorded flights.");
        println!("Use --yes to confirm.");
        return Ok(());
    }

    let removed = log.clear()?;
    println!("Deleted {removed} flights.");
    Ok(())
}

fn handle_import(cmd: &ImportCommand) {
    if let Some(source) = &cmd.source {
        println!("Importing from: {}", source.display());
    }
    println!("[Import not yet implemented]");
}

fn handle_stats(log: &TripLog, cmd: &StatsCommand) -> Result<()> {
    let stats = log.statistics();

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Travel statistics");
    println!("-----------------");
    println!("Total flights:     {}", stats.total_flights);
    println!("  Domestic:        {}", stats.domestic_flights);
    println!("  International:   {}", stats.international_flights);
    println!("Total distance:    {:.2} km", stats.total_distance_km);
    println!("Total flight time: {}", stats.formatted_flight_time());
    println!("Cities visited:    {}", stats.distinct_cities());

    if !stats.cities.is_empty() {
        println!();
        println!("Most visited:");
        for entry in stats.cities.iter().take(5) {
            println!("  {:<20} {}", entry.city, entry.visits);
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:    {}", config.database_path().display());
                println!();
                println!("[Geocoder]");
                println!("  Extra cities:     {}", config.geocoder.cities.len());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

/// Print a single record as a labeled block.
fn print_record(record: &FlightRecord) {
    if let Some(id) = record.id {
        println!("Flight #{id}");
    } else {
        println!("New flight");
    }
    println!("  Route:       {}", record.route());
    println!("  Date:        {}", record.date);
    println!("  Distance:    {:.2} km", record.distance_km);
    println!("  Flight time: {}", record.formatted_flight_time());
    println!(
        "  Scope:       {}",
        if record.is_domestic() {
            "domestic"
        } else {
            "international"
        }
    );
}

/// Print records as a fixed-width table.
fn print_table(records: &[FlightRecord]) {
    if records.is_empty() {
        return;
    }

    println!(
        "{:>5}  {:<10}  {:<30}  {:>12}  {:>8}",
        "ID", "DATE", "ROUTE", "DISTANCE", "TIME"
    );
    for record in records {
        println!(
            "{:>5}  {:<10}  {:<30}  {:>9.2} km  {:>8}",
            record.id.unwrap_or(0),
            record.date.to_string(),
            record.route(),
            record.distance_km,
            record.formatted_flight_time(),
        );
    }
}
