//! Bounded, most-recent-first history of generated field sets.

use crate::config::{HISTORY_CAPACITY, HISTORY_KEY};
use crate::error::{Result, RxError};
use crate::model::{FieldSet, HistoryRecord};

use super::KeyValueStore;

/// History of submitted field sets persisted through a [`KeyValueStore`].
///
/// Records are kept most-recent-first and never exceed the capacity; the
/// whole sequence is rewritten after every mutation.
#[derive(Debug)]
pub struct RecordStore<S> {
    backend: S,
    key: String,
    capacity: usize,
    records: Vec<HistoryRecord>,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Open the history with the default key and capacity, loading it.
    pub fn open(backend: S) -> Self {
        Self::with_settings(backend, HISTORY_KEY, HISTORY_CAPACITY)
    }

    /// Open the history under `key`, keeping at most `capacity` records.
    pub fn with_settings(backend: S, key: impl Into<String>, capacity: usize) -> Self {
        let mut store = Self {
            backend,
            key: key.into(),
            capacity,
            records: Vec::new(),
        };
        store.load();
        store
    }

    /// Reload the history from the backend.
    ///
    /// Missing, unreadable or malformed data results in an empty history.
    pub fn load(&mut self) -> &[HistoryRecord] {
        self.records = match self.backend.get(&self.key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<HistoryRecord>>(&raw) {
                Ok(mut records) => {
                    records.truncate(self.capacity);
                    records
                }
                Err(e) => {
                    tracing::warn!("Ignoring malformed history under '{}': {}", self.key, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read history '{}': {}", self.key, e);
                Vec::new()
            }
        };
        tracing::debug!("Loaded {} history record(s)", self.records.len());
        &self.records
    }

    /// Record `fields` with the current time and persist the history.
    pub fn append(&mut self, fields: FieldSet) -> &[HistoryRecord] {
        let now = chrono::Utc::now().timestamp_millis();
        self.append_at(fields, now)
    }

    /// Record `fields` at `timestamp` (Unix milliseconds).
    ///
    /// The timestamp is raised to the newest record's if it would go
    /// backwards. A failed write is logged and the in-memory history is kept.
    pub fn append_at(&mut self, fields: FieldSet, timestamp: i64) -> &[HistoryRecord] {
        let timestamp = self
            .records
            .first()
            .map_or(timestamp, |newest| timestamp.max(newest.timestamp));

        let record = HistoryRecord::new(fields, timestamp);
        self.records.insert(0, record);
        self.records.truncate(self.capacity);

        if let Err(e) = self.persist() {
            tracing::warn!("Failed to persist history: {}", e);
        }
        &self.records
    }

    /// Remove every record and persist the empty history.
    pub fn clear(&mut self) -> Result<()> {
        self.records.clear();
        self.persist()
    }

    /// Records, most recent first.
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Record at `index` (0 = most recent).
    pub fn get(&self, index: usize) -> Result<&HistoryRecord> {
        self.records.get(index).ok_or(RxError::RecordNotFound {
            index,
            len: self.records.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of records kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Borrow the backing store.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Write the full sequence under the history key.
    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.records)?;
        self.backend.set(&self.key, &json)?;
        tracing::debug!("Persisted {} history record(s)", self.records.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryStore;
    use pretty_assertions::assert_eq;

    fn fields(n: usize) -> FieldSet {
        FieldSet::new(format!("RX{}", n), "0123456789")
    }

    /// Store whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    // ==================== load tests ====================

    #[test]
    fn test_load_empty_backend() {
        let store = RecordStore::open(MemoryStore::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_malformed_json() {
        let inputs = [
            "{not json",
            "{\"rx\":\"RX1\"}",
            "[{\"rx\":1}]",
            "null",
            "42",
        ];
        for raw in inputs {
            let store = RecordStore::open(MemoryStore::with_entry(HISTORY_KEY, raw));
            assert!(store.is_empty(), "raw {:?}", raw);
        }
    }

    #[test]
    fn test_load_valid_history() {
        let raw = r#"[
            {"rx":"RX2","ndc":"1234567890","lotNumber":"","serialNumber":"","expirationDate":"","barcode1":"","barcode2":"","timestamp":20},
            {"rx":"RX1","ndc":"0123456789","lotNumber":"L","serialNumber":"","expirationDate":"2025-03-07","timestamp":10}
        ]"#;
        let store = RecordStore::open(MemoryStore::with_entry(HISTORY_KEY, raw));
        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].fields.rx, "RX2");
        assert_eq!(store.records()[1].fields.lot_number, "L");
    }

    #[test]
    fn test_load_truncates_oversized_history() {
        let records: Vec<HistoryRecord> = (0..15)
            .map(|i| HistoryRecord::new(fields(i), 100 - i as i64))
            .collect();
        let raw = serde_json::to_string(&records).unwrap();
        let store = RecordStore::open(MemoryStore::with_entry(HISTORY_KEY, raw));
        assert_eq!(store.len(), HISTORY_CAPACITY);
        assert_eq!(store.records()[0].fields.rx, "RX0");
    }

    // ==================== append tests ====================

    #[test]
    fn test_append_prepends_and_persists() {
        let mut store = RecordStore::open(MemoryStore::new());
        store.append_at(fields(1), 1000);
        store.append_at(fields(2), 2000);

        assert_eq!(store.records()[0].fields.rx, "RX2");
        assert_eq!(store.records()[1].fields.rx, "RX1");

        let raw = store.backend().get(HISTORY_KEY).unwrap().unwrap();
        let persisted: Vec<HistoryRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, store.records());
    }

    #[test]
    fn test_append_caps_at_ten() {
        let mut store = RecordStore::open(MemoryStore::new());
        for i in 0..11 {
            store.append_at(fields(i), i as i64);
        }
        assert_eq!(store.len(), 10);
        assert_eq!(store.records()[0].fields.rx, "RX10");
        assert_eq!(store.records()[9].fields.rx, "RX1");
        assert!(store.records().iter().all(|r| r.fields.rx != "RX0"));
    }

    #[test]
    fn test_append_does_not_deduplicate() {
        let mut store = RecordStore::open(MemoryStore::new());
        for _ in 0..12 {
            store.append(fields(7));
        }
        assert_eq!(store.len(), 10);
        assert!(store.records().iter().all(|r| r.fields == fields(7)));
    }

    #[test]
    fn test_append_timestamp_never_decreases() {
        let mut store = RecordStore::open(MemoryStore::new());
        store.append_at(fields(1), 5000);
        store.append_at(fields(2), 3000);
        assert_eq!(store.records()[0].timestamp, 5000);
    }

    #[test]
    fn test_append_survives_write_failure() {
        let mut store = RecordStore::open(ReadOnlyStore);
        let records = store.append_at(fields(1), 1);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_reload_roundtrip() {
        let mut store = RecordStore::open(MemoryStore::new());
        store.append_at(fields(1), 1);
        store.append_at(fields(2), 2);
        let before = store.records().to_vec();
        assert_eq!(store.load(), before.as_slice());
    }

    #[test]
    fn test_custom_capacity() {
        let mut store = RecordStore::with_settings(MemoryStore::new(), "history", 3);
        for i in 0..5 {
            store.append_at(fields(i), i as i64);
        }
        assert_eq!(store.len(), 3);
        assert_eq!(store.capacity(), 3);
        assert!(store.backend().get("history").unwrap().is_some());
    }

    // ==================== get / clear tests ====================

    #[test]
    fn test_get_out_of_range() {
        let store = RecordStore::open(MemoryStore::new());
        match store.get(0) {
            Err(RxError::RecordNotFound { index: 0, len: 0 }) => {}
            other => panic!("Expected RecordNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_clear_persists_empty_array() {
        let mut store = RecordStore::open(MemoryStore::new());
        store.append_at(fields(1), 1);
        store.clear().unwrap();
        assert!(store.is_empty());
        assert_eq!(
            store.backend().get(HISTORY_KEY).unwrap().as_deref(),
            Some("[]")
        );
    }
}
