//! Flight record model.
//!
//! Defines the single entity this crate stores: one recorded flight trip
//! between two cities.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::duration;
use crate::error::{Error, Result};
use crate::geo::Coordinates;

/// A recorded flight trip.
///
/// The store is the sole authority over `id` and `created_at`; both are
/// `None` on records that have not been persisted yet. Coordinates are
/// required for every insert, but may come back as `None` when a stored row
/// carries an encoding the loader could not parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    /// Unique identifier, assigned by the store on insert.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Departure city name, non-empty.
    pub departure_city: String,

    /// Arrival city name, non-empty.
    pub arrival_city: String,

    /// Travel date.
    pub date: NaiveDate,

    /// Flight distance in kilometers, never negative.
    pub distance_km: f64,

    /// Departure coordinates.
    pub departure_coords: Option<Coordinates>,

    /// Arrival coordinates.
    pub arrival_coords: Option<Coordinates>,

    /// Flight time in minutes. `None` means unknown, not zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_time: Option<u32>,

    /// Creation timestamp, assigned by the store and immutable afterwards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl FlightRecord {
    /// Create a new, not-yet-persisted flight record.
    ///
    /// City names are trimmed. Both coordinate pairs are required here;
    /// optional coordinates only arise when loading legacy rows.
    ///
    /// # Errors
    ///
    /// Returns a validation error for empty city names, a negative distance
    /// or out-of-range coordinates.
    pub fn new(
        departure_city: impl Into<String>,
        arrival_city: impl Into<String>,
        date: NaiveDate,
        distance_km: f64,
        departure_coords: Coordinates,
        arrival_coords: Coordinates,
        flight_time: Option<u32>,
    ) -> Result<Self> {
        let departure_city: String = departure_city.into();
        let arrival_city: String = arrival_city.into();
        let record = Self {
            id: None,
            departure_city: departure_city.trim().to_string(),
            arrival_city: arrival_city.trim().to_string(),
            date,
            distance_km,
            departure_coords: Some(departure_coords),
            arrival_coords: Some(arrival_coords),
            flight_time,
            created_at: None,
        };
        record.validate()?;
        Ok(record)
    }

    /// Validate field invariants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCity`], [`Error::NegativeDistance`] or
    /// [`Error::InvalidCoordinates`] when an invariant is violated.
    pub fn validate(&self) -> Result<()> {
        if self.departure_city.trim().is_empty() {
            return Err(Error::EmptyCity {
                field: "departure city",
            });
        }
        if self.arrival_city.trim().is_empty() {
            return Err(Error::EmptyCity {
                field: "arrival city",
            });
        }
        if self.distance_km < 0.0 || !self.distance_km.is_finite() {
            return Err(Error::NegativeDistance(self.distance_km));
        }
        if let Some(coords) = self.departure_coords {
            coords.validate()?;
        }
        if let Some(coords) = self.arrival_coords {
            coords.validate()?;
        }
        Ok(())
    }

    /// Whether this flight stays inside the domestic bounding box.
    ///
    /// Requires BOTH endpoints to be present and inside the box. A flight
    /// with either coordinate pair missing is classified as international;
    /// "unknown" is not a third bucket.
    #[must_use]
    pub fn is_domestic(&self) -> bool {
        match (self.departure_coords, self.arrival_coords) {
            (Some(dep), Some(arr)) => dep.is_domestic() && arr.is_domestic(),
            _ => false,
        }
    }

    /// Human-readable flight time for per-record display.
    #[must_use]
    pub fn formatted_flight_time(&self) -> String {
        duration::format_duration(self.flight_time)
    }

    /// Route label for display, e.g. `Beijing → Shanghai`.
    #[must_use]
    pub fn route(&self) -> String {
        format!("{} → {}", self.departure_city, self.arrival_city)
    }
}
