//! Trip log orchestration.
//!
//! [`TripLog`] ties the store, the working set and a [`Geocoder`] together
//! and implements the two-phase mutation flows: a mutation is first staged
//! (validated, geocoded, distance resolved) without touching the store, then
//! committed separately. A failure anywhere during staging leaves both the
//! store and the working set exactly as they were.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::flight::FlightRecord;
use crate::geo::{self, Coordinates};
use crate::geocode::Geocoder;
use crate::stats::Statistics;
use crate::storage::FlightStore;
use crate::workset::WorkingSet;

/// User-supplied fields for adding or editing a flight.
#[derive(Debug, Clone)]
pub struct FlightInput {
    /// Departure city name.
    pub departure_city: String,
    /// Arrival city name.
    pub arrival_city: String,
    /// Travel date.
    pub date: chrono::NaiveDate,
    /// Distance override in kilometers. `None` or a non-positive value means
    /// "compute from coordinates".
    pub distance_km: Option<f64>,
    /// Flight time in minutes. Zero means unset.
    pub flight_time: Option<u32>,
}

/// A validated, geocoded flight waiting for confirmation.
///
/// Produced by [`TripLog::stage`] and [`TripLog::stage_edit`]; nothing has
/// been written yet. Pass it back to the matching commit method to persist.
#[derive(Debug, Clone)]
pub struct StagedFlight {
    record: FlightRecord,
}

impl StagedFlight {
    /// The record that will be persisted on commit.
    #[must_use]
    pub fn record(&self) -> &FlightRecord {
        &self.record
    }
}

/// The flight trip log: durable store plus in-memory working set.
#[derive(Debug)]
pub struct TripLog {
    store: FlightStore,
    workset: WorkingSet,
}

impl TripLog {
    /// Build a trip log over an already-opened store.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial load fails.
    pub fn new(store: FlightStore) -> Result<Self> {
        let workset = WorkingSet::load(&store)?;
        Ok(Self { store, workset })
    }

    /// Open the trip log backed by the database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened or the initial load
    /// fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(FlightStore::open(path)?)
    }

    /// Open a trip log backed by an in-memory database, for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory store cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let store = FlightStore::open_in_memory()?;
        let workset = WorkingSet::load(&store)?;
        Ok(Self { store, workset })
    }

    /// Stage a new flight: validate, geocode both cities, resolve distance.
    ///
    /// City names are validated before any geocoding happens, so an empty
    /// name never costs a lookup. When no positive distance override is
    /// given the great-circle distance between the geocoded endpoints is
    /// used. Nothing is written to the store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCity`] for blank city names,
    /// [`Error::CityNotFound`] when the geocoder does not know a city, or a
    /// geocoding error when the lookup itself fails.
    pub fn stage(&self, input: &FlightInput, geocoder: &dyn Geocoder) -> Result<StagedFlight> {
        let departure_city = non_empty(&input.departure_city, "departure city")?;
        let arrival_city = non_empty(&input.arrival_city, "arrival city")?;

        let dep = resolve_city(geocoder, &departure_city)?;
        let arr = resolve_city(geocoder, &arrival_city)?;

        let distance_km = match input.distance_km {
            Some(d) if d > 0.0 => d,
            _ => geo::great_circle_km(dep, arr)?,
        };

        let record = FlightRecord::new(
            departure_city,
            arrival_city,
            input.date,
            distance_km,
            dep,
            arr,
            input.flight_time.filter(|m| *m > 0),
        )?;
        debug!("Staged new flight: {}", record.route());
        Ok(StagedFlight { record })
    }

    /// Stage an edit of an existing flight.
    ///
    /// Cities are only re-geocoded when they actually changed; an untouched
    /// endpoint keeps its stored coordinates. The distance is resolved the
    /// same way: a positive override wins, otherwise a route change triggers
    /// a recompute and an unchanged route keeps the stored distance. Passing
    /// `Some(0)` as flight time clears it; `None` keeps the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FlightNotFound`] for an unknown id, plus the same
    /// validation and geocoding errors as [`TripLog::stage`].
    pub fn stage_edit(
        &self,
        id: i64,
        input: &FlightInput,
        geocoder: &dyn Geocoder,
    ) -> Result<StagedFlight> {
        let existing = self
            .workset
            .find(id)
            .ok_or(Error::FlightNotFound { id })?;

        let departure_city = non_empty(&input.departure_city, "departure city")?;
        let arrival_city = non_empty(&input.arrival_city, "arrival city")?;

        let cities_changed =
            departure_city != existing.departure_city || arrival_city != existing.arrival_city;

        let (dep, arr) = if cities_changed {
            (
                resolve_city(geocoder, &departure_city)?,
                resolve_city(geocoder, &arrival_city)?,
            )
        } else {
            match (existing.departure_coords, existing.arrival_coords) {
                // Stored coordinates may be missing on rows the loader could
                // not parse; re-geocode those even for an unchanged route.
                (Some(dep), Some(arr)) => (dep, arr),
                _ => (
                    resolve_city(geocoder, &departure_city)?,
                    resolve_city(geocoder, &arrival_city)?,
                ),
            }
        };

        let distance_km = match input.distance_km {
            Some(d) if d > 0.0 => d,
            _ if cities_changed => geo::great_circle_km(dep, arr)?,
            _ => existing.distance_km,
        };

        let flight_time = match input.flight_time {
            Some(minutes) => Some(minutes).filter(|m| *m > 0),
            None => existing.flight_time,
        };

        let mut record = FlightRecord::new(
            departure_city,
            arrival_city,
            input.date,
            distance_km,
            dep,
            arr,
            flight_time,
        )?;
        record.id = Some(id);
        record.created_at = existing.created_at;
        debug!("Staged edit of flight {}: {}", id, record.route());
        Ok(StagedFlight { record })
    }

    /// Commit a staged addition and return the persisted record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn commit_add(&mut self, staged: StagedFlight) -> Result<FlightRecord> {
        let mut record = staged.record;
        let id = self.store.insert(&record)?;
        record.id = Some(id);
        self.workset.append_inserted(record.clone());
        info!("Recorded flight {}: {}", id, record.route());
        Ok(record)
    }

    /// Commit a staged edit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FlightNotFound`] if the flight disappeared since
    /// staging, or an error if the update or reload fails.
    pub fn commit_update(&mut self, staged: StagedFlight) -> Result<FlightRecord> {
        let record = staged.record;
        let id = record.id.ok_or(Error::FlightNotFound { id: 0 })?;
        if self.workset.find(id).is_none() {
            return Err(Error::FlightNotFound { id });
        }
        self.store.update(id, &record)?;
        self.workset.reload(&self.store)?;
        info!("Updated flight {}: {}", id, record.route());
        Ok(record)
    }

    /// Delete a flight by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FlightNotFound`] for an unknown id, or an error if
    /// the delete or reload fails.
    pub fn remove(&mut self, id: i64) -> Result<()> {
        if !self.store.delete(id)? {
            return Err(Error::FlightNotFound { id });
        }
        self.workset.reload(&self.store)?;
        info!("Deleted flight {}", id);
        Ok(())
    }

    /// Delete every flight. Irreversible.
    ///
    /// Returns the number of flights removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the clear or reload fails.
    pub fn clear(&mut self) -> Result<usize> {
        let removed = self.store.clear_all()?;
        self.workset.reload(&self.store)?;
        Ok(removed)
    }

    /// The cached records, newest first.
    #[must_use]
    pub fn records(&self) -> &[FlightRecord] {
        self.workset.records()
    }

    /// Find a record by id.
    #[must_use]
    pub fn find(&self, id: i64) -> Option<&FlightRecord> {
        self.workset.find(id)
    }

    /// Compute statistics over the current records.
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        Statistics::from_records(self.workset.records())
    }

    /// Path to the backing database file.
    #[must_use]
    pub fn database_path(&self) -> &Path {
        self.store.path()
    }
}

/// Trimmed city name, or an error when blank.
fn non_empty(name: &str, field: &'static str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyCity { field });
    }
    Ok(trimmed.to_string())
}

/// Geocode a city, turning a not-found result into an error.
fn resolve_city(geocoder: &dyn Geocoder, city: &str) -> Result<Coordinates> {
    geocoder
        .geocode(city)?
        .ok_or_else(|| Error::city_not_found(city))
}
