use std::sync::RwLock;

use sal_ledger::AttendanceRecord;

use crate::error::StoreResult;
use crate::traits::AttendanceStore;

/// In-memory attendance store for tests and embedding.
///
/// Holds the "file" contents behind an `RwLock`; records are cloned in and
/// out. Operations never fail.
#[derive(Default)]
pub struct InMemoryStore {
    records: RwLock<Vec<AttendanceRecord>>,
}

impl InMemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.records.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.read().expect("lock poisoned").is_empty()
    }
}

impl AttendanceStore for InMemoryStore {
    fn load(&self) -> StoreResult<Vec<AttendanceRecord>> {
        Ok(self.records.read().expect("lock poisoned").clone())
    }

    fn save(&self, records: &[AttendanceRecord]) -> StoreResult<()> {
        *self.records.write().expect("lock poisoned") = records.to_vec();
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("record_count", &self.len())
            .finish()
    }
}
