//! In-memory working set of flight records.
//!
//! The working set is a disposable read cache over the store: listings and
//! statistics read from it instead of hitting the database, and every
//! mutation path refreshes it so it never serves stale data.

use crate::error::Result;
use crate::flight::FlightRecord;
use crate::storage::FlightStore;

/// Read cache over the persisted flight records, kept newest first.
#[derive(Debug, Clone, Default)]
pub struct WorkingSet {
    records: Vec<FlightRecord>,
}

impl WorkingSet {
    /// Create an empty working set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a working set from the store's current contents.
    ///
    /// # Errors
    ///
    /// Returns an error if loading from the store fails.
    pub fn load(store: &FlightStore) -> Result<Self> {
        Ok(Self {
            records: store.load_all()?,
        })
    }

    /// Replace the cached records with the store's current contents.
    ///
    /// # Errors
    ///
    /// Returns an error if loading from the store fails.
    pub fn reload(&mut self, store: &FlightStore) -> Result<()> {
        self.records = store.load_all()?;
        Ok(())
    }

    /// Fold a freshly inserted record into the cache without a full reload.
    ///
    /// The record must already carry its store-assigned id. The cache is
    /// re-sorted so the newest-first order holds regardless of the record's
    /// date.
    pub fn append_inserted(&mut self, record: FlightRecord) {
        self.records.push(record);
        self.records
            .sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    }

    /// The cached records, newest first.
    #[must_use]
    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }

    /// Find a cached record by id.
    #[must_use]
    pub fn find(&self, id: i64) -> Option<&FlightRecord> {
        self.records.iter().find(|r| r.id == Some(id))
    }

    /// Number of cached records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinates;

    fn coords() -> (Coordinates, Coordinates) {
        (
            Coordinates {
                lat: 39.9042,
                lon: 116.4074,
            },
            Coordinates {
                lat: 31.2304,
                lon: 121.4737,
            },
        )
    }

    fn test_flight(date: &str) -> FlightRecord {
        let (dep, arr) = coords();
        FlightRecord::new("Beijing", "Shanghai", date.parse().unwrap(), 1067.0, dep, arr, None)
            .unwrap()
    }

    #[test]
    fn test_empty() {
        let set = WorkingSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_load_reflects_store() {
        let store = FlightStore::open_in_memory().unwrap();
        store.insert(&test_flight("2024-01-10")).unwrap();
        store.insert(&test_flight("2024-07-01")).unwrap();

        let set = WorkingSet::load(&store).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.records()[0].date.to_string(), "2024-07-01");
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let store = FlightStore::open_in_memory().unwrap();
        let mut set = WorkingSet::load(&store).unwrap();
        assert!(set.is_empty());

        let id = store.insert(&test_flight("2024-05-20")).unwrap();
        set.reload(&store).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.records()[0].id, Some(id));
    }

    #[test]
    fn test_append_inserted_keeps_order() {
        let store = FlightStore::open_in_memory().unwrap();
        store.insert(&test_flight("2024-01-10")).unwrap();
        store.insert(&test_flight("2024-07-01")).unwrap();
        let mut set = WorkingSet::load(&store).unwrap();

        // A flight dated between the two cached records.
        let mut middle = test_flight("2024-03-15");
        let id = store.insert(&middle).unwrap();
        middle.id = Some(id);
        set.append_inserted(middle);

        let dates: Vec<_> = set
            .records()
            .iter()
            .map(|f| f.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2024-07-01", "2024-03-15", "2024-01-10"]);
    }

    #[test]
    fn test_append_inserted_same_date_newest_first() {
        let store = FlightStore::open_in_memory().unwrap();
        store.insert(&test_flight("2024-05-20")).unwrap();
        let mut set = WorkingSet::load(&store).unwrap();

        let mut second = test_flight("2024-05-20");
        let id = store.insert(&second).unwrap();
        second.id = Some(id);
        set.append_inserted(second);

        assert_eq!(set.records()[0].id, Some(id));
    }

    #[test]
    fn test_find() {
        let store = FlightStore::open_in_memory().unwrap();
        let id = store.insert(&test_flight("2024-05-20")).unwrap();
        let set = WorkingSet::load(&store).unwrap();

        assert!(set.find(id).is_some());
        assert!(set.find(id + 1).is_none());
    }
}
