//! Change log entry types.

use crate::record::Record;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entity-type tag stamped on change entries for ledger records.
pub const RECORD_ENTITY_TYPE: &str = "Transaction";

/// What kind of mutation a change entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeAction {
    /// First accepted write for an identifier.
    Add,
    /// Accepted overwrite of an existing record.
    Update,
    /// Removal of a record. Reserved on the wire; the ingestion path
    /// currently never emits it.
    Delete,
}

/// One immutable entry in an owner scope's change log.
///
/// An entry is created exactly once per accepted mutation and never
/// mutated or deleted afterwards; the log is the durable replication
/// trail, independent of record-store retention. `payload` is the full
/// JSON snapshot of the record *as accepted*, so pulling clients can
/// apply a change without consulting the record store.
///
/// Serialized shape (camelCase):
///
/// ```json
/// { "id": "...", "entityId": "...", "userId": "...", "action": "ADD",
///   "entityType": "Transaction", "payload": "{...}", "version": 1,
///   "timestamp": "2026-08-01T09:30:00" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEntry {
    /// The entry's own identifier.
    pub id: String,
    /// Identifier of the affected record.
    pub entity_id: String,
    /// Owner scope the entry belongs to.
    pub user_id: String,
    /// The mutation kind.
    pub action: ChangeAction,
    /// Entity-type tag, `"Transaction"` for ledger records.
    pub entity_type: String,
    /// JSON snapshot of the record as accepted.
    pub payload: String,
    /// Version within the owner scope. Strictly increasing and unique;
    /// allocated by the change log, zero until appended.
    pub version: u64,
    /// When the entry was logged.
    pub timestamp: NaiveDateTime,
}

impl ChangeEntry {
    /// Creates an unversioned entry with a fresh UUID and the current
    /// log timestamp. The change log assigns `version` on append.
    pub fn new(
        entity_id: impl Into<String>,
        user_id: impl Into<String>,
        action: ChangeAction,
        entity_type: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            entity_id: entity_id.into(),
            user_id: user_id.into(),
            action,
            entity_type: entity_type.into(),
            payload: payload.into(),
            version: 0,
            timestamp: Local::now().naive_local(),
        }
    }

    /// Creates an entry for an accepted ledger record, serializing the
    /// snapshot payload.
    pub fn for_record(record: &Record, action: ChangeAction) -> serde_json::Result<Self> {
        let payload = serde_json::to_string(record)?;
        Ok(Self::new(
            record.id.clone(),
            record.user_id.clone(),
            action,
            RECORD_ENTITY_TYPE,
            payload,
        ))
    }

    /// Decodes the payload snapshot back into a record.
    pub fn record(&self) -> serde_json::Result<Record> {
        serde_json::from_str(&self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::EntryKind;

    #[test]
    fn new_entry_gets_uuid_and_zero_version() {
        let a = ChangeEntry::new("r1", "u1", ChangeAction::Add, RECORD_ENTITY_TYPE, "{}");
        let b = ChangeEntry::new("r1", "u1", ChangeAction::Add, RECORD_ENTITY_TYPE, "{}");
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert_eq!(a.version, 0);
    }

    #[test]
    fn for_record_snapshots_the_payload() {
        let record = Record::new("u1", EntryKind::Expense, 25.0);
        let entry = ChangeEntry::for_record(&record, ChangeAction::Add).unwrap();

        assert_eq!(entry.entity_id, record.id);
        assert_eq!(entry.user_id, "u1");
        assert_eq!(entry.entity_type, RECORD_ENTITY_TYPE);
        assert_eq!(entry.record().unwrap(), record);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let mut entry =
            ChangeEntry::new("r1", "u1", ChangeAction::Update, RECORD_ENTITY_TYPE, "{}");
        entry.version = 7;

        let json: serde_json::Value = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["entityId"], "r1");
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["action"], "UPDATE");
        assert_eq!(json["entityType"], "Transaction");
        assert_eq!(json["version"], 7);
    }

    #[test]
    fn action_tags_roundtrip() {
        for (action, tag) in [
            (ChangeAction::Add, "\"ADD\""),
            (ChangeAction::Update, "\"UPDATE\""),
            (ChangeAction::Delete, "\"DELETE\""),
        ] {
            assert_eq!(serde_json::to_string(&action).unwrap(), tag);
            let back: ChangeAction = serde_json::from_str(tag).unwrap();
            assert_eq!(back, action);
        }
    }
}
