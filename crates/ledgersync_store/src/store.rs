//! The record store capability trait.

use crate::error::StoreResult;
use ledgersync_protocol::Record;

/// Durable keyed storage for the current state of ledger records.
///
/// Implementations must be `Send + Sync`; the engine shares one store
/// across concurrent callers behind `Arc<dyn RecordStore>`.
pub trait RecordStore: Send + Sync {
    /// Returns the current record for `id`, if any.
    fn get(&self, id: &str) -> StoreResult<Option<Record>>;

    /// Conditionally writes `record`.
    ///
    /// - No stored record: inserts and returns the saved snapshot.
    /// - Stored record present: replaces it only if `record.updated_at`
    ///   is strictly later (a stored record without a stamp always
    ///   loses). The stored `created_at` is preserved on replace.
    /// - Otherwise returns `Ok(None)`: the stored state won and nothing
    ///   changed.
    ///
    /// The check and the write are one atomic step with respect to other
    /// callers; two racing writers cannot both observe "I was newer".
    /// Returns the snapshot actually saved so callers can log the record
    /// exactly as accepted.
    fn upsert_if_newer(&self, record: &Record) -> StoreResult<Option<Record>>;

    /// Returns true if a record with `id` is stored.
    fn exists(&self, id: &str) -> StoreResult<bool>;
}

/// Shared conditional-replace rule for store implementations.
///
/// Returns the snapshot to save, or `None` when the stored record wins.
/// `existing` is `None` for a first write.
pub(crate) fn merge_newer(existing: Option<&Record>, incoming: &Record) -> Option<Record> {
    match existing {
        None => Some(incoming.clone()),
        Some(stored) => {
            let newer = match (incoming.updated_at, stored.updated_at) {
                (Some(inc), Some(cur)) => inc > cur,
                (Some(_), None) => true,
                (None, _) => false,
            };
            if newer {
                let mut saved = incoming.clone();
                // First-write timestamp is immutable.
                saved.created_at = stored.created_at;
                Some(saved)
            } else {
                None
            }
        }
    }
}
