//! Error types for flightlog.
//!
//! This module defines all error types used throughout the flightlog crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for flightlog operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Record Validation Errors ===
    /// A required city name was empty.
    #[error("{field} must not be empty")]
    EmptyCity {
        /// Which city field was empty.
        field: &'static str,
    },

    /// A coordinate pair was outside the valid latitude/longitude range.
    #[error("coordinates out of range: latitude {lat}, longitude {lon}")]
    InvalidCoordinates {
        /// Latitude in decimal degrees.
        lat: f64,
        /// Longitude in decimal degrees.
        lon: f64,
    },

    /// A flight distance was negative.
    #[error("flight distance must not be negative: {0} km")]
    NegativeDistance(f64),

    /// A record is missing the coordinates required for persistence.
    #[error("flight record has no coordinates for '{city}'")]
    MissingCoordinates {
        /// The city whose coordinates are absent.
        city: String,
    },

    /// No flight record exists with the given id.
    #[error("no flight record with id {id}")]
    FlightNotFound {
        /// The requested record id.
        id: i64,
    },

    // === Geocoding Errors ===
    /// The geocoding collaborator found no coordinates for a city.
    #[error("no coordinates found for city '{city}'")]
    CityNotFound {
        /// The city name that could not be resolved.
        city: String,
    },

    /// The geocoding collaborator failed (network, timeout, backend error).
    #[error("geocoding failed for '{city}': {message}")]
    Geocoding {
        /// The city being resolved when the failure happened.
        city: String,
        /// Description of what went wrong.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for flightlog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a geocoding failure error.
    #[must_use]
    pub fn geocoding(city: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Geocoding {
            city: city.into(),
            message: message.into(),
        }
    }

    /// Create a city-not-found error.
    #[must_use]
    pub fn city_not_found(city: impl Into<String>) -> Self {
        Self::CityNotFound { city: city.into() }
    }

    /// Check if this error came from the geocoding step.
    ///
    /// Not-found and transport failures are handled identically by callers:
    /// the pending mutation is aborted and the store stays untouched.
    #[must_use]
    pub fn is_geocoding_failure(&self) -> bool {
        matches!(self, Self::CityNotFound { .. } | Self::Geocoding { .. })
    }
}
