//! `SQLite` schema definitions for flightlog.
//!
//! This module contains the SQL statements for creating and managing
//! the database schema.

/// SQL statement to create the flights table.
pub const CREATE_FLIGHTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS flights (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    departure_city TEXT NOT NULL,
    arrival_city TEXT NOT NULL,
    date TEXT NOT NULL,
    distance REAL NOT NULL,
    departure_coords TEXT NOT NULL,
    arrival_coords TEXT NOT NULL,
    flight_time INTEGER,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create an index on date for newest-first listing.
pub const CREATE_DATE_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_flights_date ON flights(date DESC)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_FLIGHTS_TABLE,
    CREATE_DATE_INDEX,
    CREATE_METADATA_TABLE,
];
