//! Identity reconciliation for incoming records.

use ledgersync_protocol::Record;
use uuid::Uuid;

/// How an incoming record's identity was settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// The client supplied a non-empty identifier; it was kept. Push
    /// reports `client_id -> server_id` for these in `id_mapping`.
    Client(String),
    /// The record arrived without an identifier and was assigned a
    /// fresh one. There is no client-side key to map from, so these are
    /// reported through `success_ids` only.
    Assigned,
}

/// Mints a fresh record identifier, unique across all scopes.
///
/// Identifiers are the primary key of the record store, so uniqueness
/// must hold globally, not merely within one owner scope.
#[must_use]
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// Ensures `record` carries an identifier, assigning one if it is
/// empty. Runs before conflict resolution in the push pipeline.
pub fn reconcile_identity(record: &mut Record) -> Identity {
    if record.has_identity() {
        Identity::Client(record.id.clone())
    } else {
        record.id = new_record_id();
        Identity::Assigned
    }
}
