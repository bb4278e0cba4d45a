//! Storage layer for flightlog.
//!
//! This module provides `SQLite`-based persistent storage for flight
//! records: durable CRUD, newest-first loading, and a schema that stays
//! tolerant of rows written by older versions of the tool.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::flight::FlightRecord;
use crate::geo::Coordinates;

/// Durable store for flight records.
///
/// The store is the sole authority over persisted state; the in-memory
/// working set is a disposable copy rebuilt from [`FlightStore::load_all`].
/// Single-writer use is assumed. Each operation is individually atomic, but
/// multi-step flows (geocode, then insert) are not atomic with respect to
/// the store; the insert only happens once everything before it succeeded.
#[derive(Debug)]
pub struct FlightStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl FlightStore {
    /// Open or create a flight database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist
    /// and runs pending schema migrations. Idempotent; safe to call on every
    /// process start.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema
    /// initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        // Enable WAL mode for better concurrent read performance
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a flight record and return the store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid record, a
    /// [`Error::MissingCoordinates`] when either endpoint has no
    /// coordinates, or a database error if the insert fails.
    pub fn insert(&self, flight: &FlightRecord) -> Result<i64> {
        flight.validate()?;
        let (dep, arr) = required_coords(flight)?;

        self.conn.execute(
            r"
            INSERT INTO flights (departure_city, arrival_city, date, distance,
                                 departure_coords, arrival_coords, flight_time)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
            params![
                flight.departure_city,
                flight.arrival_city,
                flight.date.to_string(),
                flight.distance_km,
                serde_json::to_string(&dep)?,
                serde_json::to_string(&arr)?,
                flight.flight_time.map(i64::from),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted flight {}: {}", id, flight.route());
        Ok(id)
    }

    /// Load every record, newest first.
    ///
    /// Records are ordered by date descending, ties broken by id descending
    /// (insertion recency). Malformed stored data is tolerated: an
    /// unparseable coordinate encoding loads as `None` and a non-numeric
    /// flight time loads as `None`, neither fails the load.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn load_all(&self) -> Result<Vec<FlightRecord>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, departure_city, arrival_city, date, distance,
                   departure_coords, arrival_coords, flight_time, created_at
            FROM flights ORDER BY date DESC, id DESC
            ",
        )?;

        let flights = stmt
            .query_map([], Self::row_to_flight)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(flights)
    }

    /// Replace all mutable fields of the record with the given id.
    ///
    /// `id` and `created_at` are immutable and never touched. Updating a
    /// non-existent id is a silent no-op; callers that care about existence
    /// must check beforehand.
    ///
    /// # Errors
    ///
    /// Returns a validation or database error; an unknown id is not an error.
    pub fn update(&self, id: i64, flight: &FlightRecord) -> Result<()> {
        flight.validate()?;
        let (dep, arr) = required_coords(flight)?;

        let affected = self.conn.execute(
            r"
            UPDATE flights
            SET departure_city = ?1, arrival_city = ?2, date = ?3, distance = ?4,
                departure_coords = ?5, arrival_coords = ?6, flight_time = ?7
            WHERE id = ?8
            ",
            params![
                flight.departure_city,
                flight.arrival_city,
                flight.date.to_string(),
                flight.distance_km,
                serde_json::to_string(&dep)?,
                serde_json::to_string(&arr)?,
                flight.flight_time.map(i64::from),
                id,
            ],
        )?;

        if affected == 0 {
            debug!("Update of flight {} matched no rows", id);
        }
        Ok(())
    }

    /// Delete a record by id.
    ///
    /// Returns `true` if a record was deleted, `false` if none existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let affected = self.conn.execute("DELETE FROM flights WHERE id = ?1", [id])?;
        Ok(affected > 0)
    }

    /// Delete every record. Irreversible.
    ///
    /// Returns the number of records removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn clear_all(&self) -> Result<usize> {
        let affected = self.conn.execute("DELETE FROM flights", [])?;
        if affected > 0 {
            info!("Cleared {} flight records", affected);
        }
        Ok(affected)
    }

    /// Count stored records.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM flights", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Convert a database row to a `FlightRecord`.
    fn row_to_flight(row: &rusqlite::Row) -> rusqlite::Result<FlightRecord> {
        let id: i64 = row.get(0)?;
        let departure_city: String = row.get(1)?;
        let arrival_city: String = row.get(2)?;
        let date_str: String = row.get(3)?;
        let distance_km: f64 = row.get(4)?;
        let dep_text: String = row.get(5)?;
        let arr_text: String = row.get(6)?;
        let flight_time = coerce_flight_time(row.get_ref(7)?);
        let created_str: Option<String> = row.get(8)?;

        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(FlightRecord {
            id: Some(id),
            departure_city,
            arrival_city,
            date,
            distance_km,
            departure_coords: parse_coords(id, "departure", &dep_text),
            arrival_coords: parse_coords(id, "arrival", &arr_text),
            flight_time,
            created_at: created_str.as_deref().and_then(parse_created_at),
        })
    }
}

/// Both coordinate pairs, or an error naming the city whose pair is missing.
fn required_coords(flight: &FlightRecord) -> Result<(Coordinates, Coordinates)> {
    let dep = flight
        .departure_coords
        .ok_or_else(|| Error::MissingCoordinates {
            city: flight.departure_city.clone(),
        })?;
    let arr = flight
        .arrival_coords
        .ok_or_else(|| Error::MissingCoordinates {
            city: flight.arrival_city.clone(),
        })?;
    Ok((dep, arr))
}

/// Parse a stored coordinate encoding, tolerating malformed data.
///
/// Accepts the structured `{"lat":..,"lon":..}` object and, for databases
/// written by the original tool, the positional `[lat, lon]` array. Anything
/// else (or an out-of-range pair) loads as `None` with a warning.
fn parse_coords(id: i64, endpoint: &str, text: &str) -> Option<Coordinates> {
    let coords = serde_json::from_str::<Coordinates>(text)
        .ok()
        .or_else(|| {
            serde_json::from_str::<[f64; 2]>(text)
                .ok()
                .map(|[lat, lon]| Coordinates { lat, lon })
        })
        .filter(|c| c.validate().is_ok());

    if coords.is_none() {
        warn!(
            "Flight {}: unparseable {} coordinates {:?}, treating as missing",
            id, endpoint, text
        );
    }
    coords
}

/// Coerce a stored flight time to minutes.
///
/// `SQLite`'s dynamic typing means the column can hold anything; a
/// non-numeric or negative value reads back as `None` rather than failing
/// the load.
fn coerce_flight_time(value: ValueRef<'_>) -> Option<u32> {
    match value {
        ValueRef::Integer(m) => u32::try_from(m).ok(),
        ValueRef::Real(m) if m >= 0.0 && m.is_finite() => Some(m as u32),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok()?.trim().parse().ok(),
        _ => None,
    }
}

/// Parse the store-assigned creation timestamp (`datetime('now')` format).
fn parse_created_at(text: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
