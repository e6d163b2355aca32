use sal_ledger::AttendanceRecord;

use crate::error::StoreResult;

/// Persistent backing store for the attendance ledger.
///
/// All implementations must satisfy these invariants:
/// - `load` returns every stored record in its stored order; a store that
///   has never been written loads as empty.
/// - `save` replaces the entire contents with the given records. There is
///   no partial update and no merge.
/// - I/O errors are propagated, never silently ignored. A failed `save`
///   leaves the caller responsible for keeping its state consistent.
pub trait AttendanceStore: Send + Sync {
    /// Read all records from the store.
    fn load(&self) -> StoreResult<Vec<AttendanceRecord>>;

    /// Replace the store contents with `records`.
    fn save(&self, records: &[AttendanceRecord]) -> StoreResult<()>;
}
