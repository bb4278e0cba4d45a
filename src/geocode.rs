//! Geocoding collaborator interface.
//!
//! The core never resolves city names itself; it consumes a [`Geocoder`]
//! implemented by a collaborator and only validates and stores the resulting
//! coordinates. Callers treat a not-found result and a transport error the
//! same way: the pending mutation is aborted and the store stays untouched.

use std::collections::HashMap;

use crate::error::Result;
use crate::geo::Coordinates;

/// Resolves city names to coordinates.
pub trait Geocoder {
    /// Look up the coordinates for a city name.
    ///
    /// Returns `Ok(None)` when the city is unknown to this geocoder.
    ///
    /// # Errors
    ///
    /// Returns an error when the lookup itself fails, e.g. a network or
    /// backend error for remote implementations.
    fn geocode(&self, city: &str) -> Result<Option<Coordinates>>;
}

/// Offline geocoder backed by a fixed city table.
///
/// Lookups are case-insensitive and ignore surrounding whitespace. Extra
/// cities can be registered from configuration; a remote geocoding backend
/// would implement [`Geocoder`] directly instead.
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    cities: HashMap<String, Coordinates>,
}

impl StaticGeocoder {
    /// Create an empty geocoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a geocoder preloaded with a set of frequently flown cities.
    #[must_use]
    pub fn with_builtin_cities() -> Self {
        let mut geocoder = Self::new();
        for (name, lat, lon) in BUILTIN_CITIES {
            geocoder.insert(name, Coordinates { lat: *lat, lon: *lon });
        }
        geocoder
    }

    /// Register a city, replacing any previous entry with the same name.
    pub fn insert(&mut self, name: &str, coords: Coordinates) {
        self.cities.insert(Self::key(name), coords);
    }

    /// Number of known cities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Whether no cities are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    fn key(name: &str) -> String {
        name.trim().to_lowercase()
    }
}

impl Geocoder for StaticGeocoder {
    fn geocode(&self, city: &str) -> Result<Option<Coordinates>> {
        Ok(self.cities.get(&Self::key(city)).copied())
    }
}

/// Built-in city table: (name, latitude, longitude).
const BUILTIN_CITIES: &[(&str, f64, f64)] = &[
    ("Beijing", 39.9042, 116.4074),
    ("Shanghai", 31.2304, 121.4737),
    ("Guangzhou", 23.1291, 113.2644),
    ("Shenzhen", 22.5431, 114.0579),
    ("Chengdu", 30.5728, 104.0668),
    ("Xi'an", 34.3416, 108.9398),
    ("Hangzhou", 30.2741, 120.1551),
    ("Kunming", 24.8801, 102.8329),
    ("Harbin", 45.8038, 126.5349),
    ("Urumqi", 43.8256, 87.6168),
    ("Hong Kong", 22.3193, 114.1694),
    ("Tokyo", 35.6762, 139.6503),
    ("Seoul", 37.5665, 126.978),
    ("Singapore", 1.3521, 103.8198),
    ("Bangkok", 13.7563, 100.5018),
    ("Dubai", 25.2048, 55.2708),
    ("Moscow", 55.7558, 37.6173),
    ("London", 51.5074, -0.1278),
    ("Paris", 48.8566, 2.3522),
    ("Frankfurt", 50.1109, 8.6821),
    ("New York", 40.7128, -74.006),
    ("San Francisco", 37.7749, -122.4194),
    ("Los Angeles", 34.0522, -118.2437),
    ("Sydney", -33.8688, 151.2093),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_city_found() {
        let geocoder = StaticGeocoder::with_builtin_cities();
        let coords = geocoder.geocode("Beijing").unwrap().unwrap();
        assert!((coords.lat - 39.9042).abs() < 1e-9);
        assert!((coords.lon - 116.4074).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_city_is_none() {
        let geocoder = StaticGeocoder::with_builtin_cities();
        assert!(geocoder.geocode("Atlantis").unwrap().is_none());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let geocoder = StaticGeocoder::with_builtin_cities();
        assert!(geocoder.geocode("beijing").unwrap().is_some());
        assert!(geocoder.geocode("SAN FRANCISCO").unwrap().is_some());
        assert!(geocoder.geocode("  Tokyo  ").unwrap().is_some());
    }

    #[test]
    fn test_insert_overrides() {
        let mut geocoder = StaticGeocoder::with_builtin_cities();
        let moved = Coordinates { lat: 1.0, lon: 2.0 };
        geocoder.insert("Beijing", moved);
        assert_eq!(geocoder.geocode("Beijing").unwrap(), Some(moved));
    }

    #[test]
    fn test_empty_geocoder() {
        let geocoder = StaticGeocoder::new();
        assert!(geocoder.is_empty());
        assert!(geocoder.geocode("Beijing").unwrap().is_none());
    }

    #[test]
    fn test_builtin_coordinates_are_valid() {
        let geocoder = StaticGeocoder::with_builtin_cities();
        assert_eq!(geocoder.len(), BUILTIN_CITIES.len());
        for (name, lat, lon) in BUILTIN_CITIES {
            let coords = Coordinates {
                lat: *lat,
                lon: *lon,
            };
            assert!(coords.validate().is_ok(), "bad coordinates for {name}");
        }
    }
}
