//! In-memory record store.

use crate::error::StoreResult;
use crate::store::{merge_newer, RecordStore};
use ledgersync_protocol::Record;
use parking_lot::RwLock;
use std::collections::HashMap;

/// An in-memory record store.
///
/// Suitable for unit tests, integration tests, and ephemeral
/// deployments where durability is not required.
///
/// # Thread safety
///
/// All state lives behind a [`RwLock`]; the store can be shared across
/// threads.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, Record>>,
}

impl MemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, id: &str) -> StoreResult<Option<Record>> {
        Ok(self.records.read().get(id).cloned())
    }

    fn upsert_if_newer(&self, record: &Record) -> StoreResult<Option<Record>> {
        let mut records = self.records.write();
        let saved = merge_newer(records.get(&record.id), record);
        if let Some(ref saved) = saved {
            records.insert(saved.id.clone(), saved.clone());
        }
        Ok(saved)
    }

    fn exists(&self, id: &str) -> StoreResult<bool> {
        Ok(self.records.read().contains_key(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use ledgersync_protocol::EntryKind;

    fn ts(s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
            + chrono::Duration::seconds(i64::from(s))
    }

    fn record(id: &str, amount: f64, stamp: u32) -> Record {
        let mut r = Record::new("u1", EntryKind::Expense, amount);
        r.id = id.into();
        r.updated_at = Some(ts(stamp));
        r
    }

    #[test]
    fn new_store_is_empty() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(store.get("missing").unwrap().is_none());
        assert!(!store.exists("missing").unwrap());
    }

    #[test]
    fn insert_then_get() {
        let store = MemoryStore::new();
        store.upsert_if_newer(&record("r1", 10.0, 1)).unwrap();

        let stored = store.get("r1").unwrap().unwrap();
        assert_eq!(stored.amount, 10.0);
        assert!(store.exists("r1").unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn newer_write_replaces() {
        let store = MemoryStore::new();
        store.upsert_if_newer(&record("r1", 10.0, 1)).unwrap();
        let saved = store.upsert_if_newer(&record("r1", 20.0, 2)).unwrap();

        assert!(saved.is_some());
        assert_eq!(store.get("r1").unwrap().unwrap().amount, 20.0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn stale_write_is_ignored() {
        let store = MemoryStore::new();
        store.upsert_if_newer(&record("r1", 10.0, 5)).unwrap();

        assert!(store.upsert_if_newer(&record("r1", 99.0, 5)).unwrap().is_none());
        assert!(store.upsert_if_newer(&record("r1", 99.0, 4)).unwrap().is_none());
        assert_eq!(store.get("r1").unwrap().unwrap().amount, 10.0);
    }

    #[test]
    fn created_at_survives_updates() {
        let store = MemoryStore::new();
        let mut first = record("r1", 10.0, 1);
        first.created_at = ts(0);
        store.upsert_if_newer(&first).unwrap();

        let mut second = record("r1", 20.0, 2);
        second.created_at = ts(50);
        let saved = store.upsert_if_newer(&second).unwrap().unwrap();

        assert_eq!(saved.created_at, ts(0));
        assert_eq!(store.get("r1").unwrap().unwrap().created_at, ts(0));
    }

    #[test]
    fn records_are_independent() {
        let store = MemoryStore::new();
        store.upsert_if_newer(&record("r1", 1.0, 1)).unwrap();
        store.upsert_if_newer(&record("r2", 2.0, 1)).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("r1").unwrap().unwrap().amount, 1.0);
        assert_eq!(store.get("r2").unwrap().unwrap().amount, 2.0);
    }
}
