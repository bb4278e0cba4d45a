//! Aggregate statistics over flight records.
//!
//! Statistics are a pure fold over a record slice; they read whatever the
//! caller hands them (usually the working set) and never touch the store.

use std::collections::HashMap;

use serde::Serialize;

use crate::duration;
use crate::flight::FlightRecord;

/// Visit count for a single city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityVisits {
    /// City name as recorded.
    pub city: String,
    /// Times the city appears as departure or arrival.
    pub visits: usize,
}

/// Aggregate statistics over a set of flight records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// Total number of flights.
    pub total_flights: usize,
    /// Flights with both endpoints inside the domestic bounding box.
    pub domestic_flights: usize,
    /// Everything else, including flights with missing coordinates.
    pub international_flights: usize,
    /// Sum of all flight distances in kilometers.
    pub total_distance_km: f64,
    /// Sum of all known flight times in minutes; unknown times count as zero.
    pub total_flight_time_min: u32,
    /// Per-city visit counts, most visited first, ties by name.
    pub cities: Vec<CityVisits>,
}

impl Statistics {
    /// Compute statistics from a slice of records.
    ///
    /// Every flight is either domestic or international; a flight with a
    /// missing coordinate pair counts as international. A round trip between
    /// two cities counts each city twice.
    #[must_use]
    pub fn from_records(records: &[FlightRecord]) -> Self {
        let mut domestic = 0;
        let mut total_distance = 0.0;
        let mut total_time: u32 = 0;
        let mut visits: HashMap<&str, usize> = HashMap::new();

        for record in records {
            if record.is_domestic() {
                domestic += 1;
            }
            total_distance += record.distance_km;
            if let Some(minutes) = record.flight_time {
                total_time = total_time.saturating_add(minutes);
            }
            *visits.entry(record.departure_city.as_str()).or_default() += 1;
            *visits.entry(record.arrival_city.as_str()).or_default() += 1;
        }

        let mut cities: Vec<CityVisits> = visits
            .into_iter()
            .map(|(city, visits)| CityVisits {
                city: city.to_string(),
                visits,
            })
            .collect();
        cities.sort_by(|a, b| b.visits.cmp(&a.visits).then_with(|| a.city.cmp(&b.city)));

        Self {
            total_flights: records.len(),
            domestic_flights: domestic,
            international_flights: records.len() - domestic,
            total_distance_km: total_distance,
            total_flight_time_min: total_time,
            cities,
        }
    }

    /// Number of distinct cities visited.
    #[must_use]
    pub fn distinct_cities(&self) -> usize {
        self.cities.len()
    }

    /// Human-readable total flight time, `0h` when nothing is recorded.
    #[must_use]
    pub fn formatted_flight_time(&self) -> String {
        duration::format_total_duration(self.total_flight_time_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinates;

    fn beijing() -> Coordinates {
        Coordinates {
            lat: 39.9042,
            lon: 116.4074,
        }
    }

    fn shanghai() -> Coordinates {
        Coordinates {
            lat: 31.2304,
            lon: 121.4737,
        }
    }

    fn tokyo() -> Coordinates {
        Coordinates {
            lat: 35.6762,
            lon: 139.6503,
        }
    }

    fn flight(
        from: &str,
        to: &str,
        dep: Coordinates,
        arr: Coordinates,
        distance: f64,
        minutes: Option<u32>,
    ) -> FlightRecord {
        FlightRecord::new(
            from,
            to,
            "2024-05-20".parse().unwrap(),
            distance,
            dep,
            arr,
            minutes,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_records() {
        let stats = Statistics::from_records(&[]);
        assert_eq!(stats.total_flights, 0);
        assert_eq!(stats.domestic_flights, 0);
        assert_eq!(stats.international_flights, 0);
        assert!(stats.total_distance_km.abs() < f64::EPSILON);
        assert_eq!(stats.total_flight_time_min, 0);
        assert!(stats.cities.is_empty());
        assert_eq!(stats.formatted_flight_time(), "0h");
    }

    #[test]
    fn test_domestic_and_international_split() {
        // Two domestic flights and one with a missing arrival coordinate.
        let mut unknown = flight("Beijing", "Nowhere", beijing(), shanghai(), 500.0, None);
        unknown.arrival_coords = None;

        let records = vec![
            flight("Beijing", "Shanghai", beijing(), shanghai(), 1067.0, Some(135)),
            flight("Shanghai", "Beijing", shanghai(), beijing(), 1067.0, Some(140)),
            unknown,
        ];

        let stats = Statistics::from_records(&records);
        assert_eq!(stats.total_flights, 3);
        assert_eq!(stats.domestic_flights, 2);
        assert_eq!(stats.international_flights, 1);
    }

    #[test]
    fn test_totals() {
        let records = vec![
            flight("Beijing", "Shanghai", beijing(), shanghai(), 1067.0, Some(135)),
            flight("Beijing", "Tokyo", beijing(), tokyo(), 2100.5, None),
        ];

        let stats = Statistics::from_records(&records);
        assert!((stats.total_distance_km - 3167.5).abs() < 1e-9);
        assert_eq!(stats.total_flight_time_min, 135);
        assert_eq!(stats.formatted_flight_time(), "2h15m");
    }

    #[test]
    fn test_city_visits_round_trip_counts_twice() {
        let records = vec![
            flight("Beijing", "Shanghai", beijing(), shanghai(), 1067.0, None),
            flight("Shanghai", "Beijing", shanghai(), beijing(), 1067.0, None),
        ];

        let stats = Statistics::from_records(&records);
        assert_eq!(stats.distinct_cities(), 2);
        for entry in &stats.cities {
            assert_eq!(entry.visits, 2);
        }
    }

    #[test]
    fn test_city_ordering_most_visited_first_ties_by_name() {
        let records = vec![
            flight("Beijing", "Shanghai", beijing(), shanghai(), 1067.0, None),
            flight("Beijing", "Tokyo", beijing(), tokyo(), 2100.0, None),
        ];

        let stats = Statistics::from_records(&records);
        let names: Vec<_> = stats.cities.iter().map(|c| c.city.as_str()).collect();
        assert_eq!(names, vec!["Beijing", "Shanghai", "Tokyo"]);
        assert_eq!(stats.cities[0].visits, 2);
    }

    #[test]
    fn test_unknown_flight_times_count_as_zero() {
        let records = vec![
            flight("Beijing", "Shanghai", beijing(), shanghai(), 1067.0, None),
            flight("Shanghai", "Beijing", shanghai(), beijing(), 1067.0, Some(60)),
        ];

        let stats = Statistics::from_records(&records);
        assert_eq!(stats.total_flight_time_min, 60);
        assert_eq!(stats.formatted_flight_time(), "1h");
    }
}
