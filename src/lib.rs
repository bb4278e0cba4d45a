//! `flightlog` - A personal flight trip recorder
//!
//! This library provides the core functionality for recording flight trips
//! between cities, computing great-circle distances, and aggregating travel
//! statistics over a local `SQLite` database.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod duration;
pub mod error;
pub mod flight;
pub mod geo;
pub mod geocode;
pub mod logging;
pub mod stats;
pub mod storage;
pub mod trips;
pub mod workset;

pub use config::Config;
pub use error::{Error, Result};
pub use flight::FlightRecord;
pub use geo::Coordinates;
pub use geocode::{Geocoder, StaticGeocoder};
pub use logging::init_logging;
pub use stats::Statistics;
pub use storage::FlightStore;
pub use trips::{FlightInput, StagedFlight, TripLog};
pub use workset::WorkingSet;
