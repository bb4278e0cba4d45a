//! Coordinate and distance utilities.
//!
//! Pure geometry helpers used by the record model and the statistics
//! aggregator: great-circle distance on a sphere model, coordinate range
//! validation, and the domestic bounding-box test.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Latitude band used as a coarse proxy for "within China".
const DOMESTIC_LAT: RangeInclusive<f64> = 18.0..=54.0;

/// Longitude band used as a coarse proxy for "within China".
const DOMESTIC_LON: RangeInclusive<f64> = 73.0..=135.0;

/// A WGS84 coordinate pair in decimal degrees.
///
/// Persisted as a structured two-field JSON object (`{"lat":..,"lon":..}`)
/// rather than an ad-hoc positional array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees, valid range [-90, 90].
    pub lat: f64,
    /// Longitude in decimal degrees, valid range [-180, 180].
    pub lon: f64,
}

impl Coordinates {
    /// Create a coordinate pair, rejecting out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoordinates`] if latitude is outside [-90, 90]
    /// or longitude is outside [-180, 180].
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        let coords = Self { lat, lon };
        coords.validate()?;
        Ok(coords)
    }

    /// Validate that both components are in range and finite.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoordinates`] for out-of-range or non-finite
    /// values.
    pub fn validate(&self) -> Result<()> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lon_ok = self.lon.is_finite() && (-180.0..=180.0).contains(&self.lon);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(Error::InvalidCoordinates {
                lat: self.lat,
                lon: self.lon,
            })
        }
    }

    /// Whether this point falls inside the domestic bounding box.
    #[must_use]
    pub fn is_domestic(&self) -> bool {
        is_domestic(self.lat, self.lon)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// Great-circle distance between two points in kilometers.
///
/// Uses the haversine formula on a spherical Earth model and rounds the
/// result to 2 decimal places. Symmetric in its arguments and zero for
/// identical points.
///
/// # Errors
///
/// Returns [`Error::InvalidCoordinates`] if either pair is out of range,
/// rather than silently producing a nonsense distance.
pub fn great_circle_km(a: Coordinates, b: Coordinates) -> Result<f64> {
    a.validate()?;
    b.validate()?;

    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    Ok(round_to_2dp(EARTH_RADIUS_KM * c))
}

/// Whether a point falls inside the domestic bounding box.
///
/// True iff 18 ≤ lat ≤ 54 and 73 ≤ lon ≤ 135. This is a fixed-rectangle
/// approximation of mainland China used for the domestic/international
/// statistics split; it is not a country-boundary test and is not
/// geopolitically authoritative.
#[must_use]
pub fn is_domestic(lat: f64, lon: f64) -> bool {
    DOMESTIC_LAT.contains(&lat) && DOMESTIC_LON.contains(&lon)
}

fn round_to_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
