//! The synchronized ledger entry.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a record is money spent or money received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    /// Money spent.
    Expense,
    /// Money received.
    Income,
}

/// A financial transaction, the entity replicated by the sync engine.
///
/// Serialized shape (camelCase, `type` for the kind tag):
///
/// ```json
/// { "id": "...", "userId": "...", "type": "EXPENSE", "amount": 12.5,
///   "categoryId": "...", "description": "...", "date": "2026-08-01T09:30:00",
///   "createdAt": "...", "updatedAt": "...", "tags": "food,travel" }
/// ```
///
/// `updated_at` is the last-write-wins stamp: an accepted write must carry
/// a strictly later value than the stored one. `created_at` is immutable
/// after the first accepted write. Both are local date-times with no zone
/// normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Globally unique identifier. Empty means "not yet assigned"; the
    /// server assigns one during push.
    #[serde(default)]
    pub id: String,
    /// Owner scope. Forced to the caller's scope on ingestion, so a
    /// client cannot write into another owner's stream.
    #[serde(default)]
    pub user_id: String,
    /// Expense or income.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Monetary amount.
    pub amount: f64,
    /// Category reference, if any.
    #[serde(default)]
    pub category_id: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// When the transaction happened (not when it was recorded).
    #[serde(default = "now")]
    pub date: NaiveDateTime,
    /// First-write timestamp. Preserved verbatim on later updates.
    #[serde(default = "now")]
    pub created_at: NaiveDateTime,
    /// Last-modification timestamp used for conflict resolution. A
    /// missing value is tolerated on push and treated as "now".
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    /// Comma-separated tags.
    #[serde(default)]
    pub tags: Option<String>,
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl Record {
    /// Creates a record with a fresh identifier and current timestamps.
    pub fn new(user_id: impl Into<String>, kind: EntryKind, amount: f64) -> Self {
        let ts = now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            kind,
            amount,
            category_id: None,
            description: None,
            date: ts,
            created_at: ts,
            updated_at: Some(ts),
            tags: None,
        }
    }

    /// Returns true if the record carries a non-empty identifier.
    pub fn has_identity(&self) -> bool {
        !self.id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 1)
            .unwrap()
            .and_hms_opt(12, 0, s)
            .unwrap()
    }

    #[test]
    fn new_record_has_identity() {
        let record = Record::new("u1", EntryKind::Expense, 10.0);
        assert!(record.has_identity());
        assert!(record.updated_at.is_some());
        assert_eq!(record.created_at, record.date);
    }

    #[test]
    fn empty_id_means_no_identity() {
        let mut record = Record::new("u1", EntryKind::Income, 5.0);
        record.id = String::new();
        assert!(!record.has_identity());
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let mut record = Record::new("u1", EntryKind::Expense, 42.5);
        record.id = "r1".into();
        record.category_id = Some("food".into());
        record.date = ts(0);
        record.created_at = ts(0);
        record.updated_at = Some(ts(30));

        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "r1");
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["type"], "EXPENSE");
        assert_eq!(json["amount"], 42.5);
        assert_eq!(json["categoryId"], "food");
        assert_eq!(json["updatedAt"], "2026-08-01T12:00:30");
    }

    #[test]
    fn deserializes_sparse_client_payload() {
        // Offline clients may send only the fields they know.
        let record: Record =
            serde_json::from_str(r#"{"type":"INCOME","amount":10.0}"#).unwrap();
        assert_eq!(record.id, "");
        assert_eq!(record.kind, EntryKind::Income);
        assert!(record.updated_at.is_none());
        assert!(record.category_id.is_none());
    }

    #[test]
    fn timestamp_roundtrip_is_lossless() {
        let mut record = Record::new("u1", EntryKind::Expense, 1.0);
        record.updated_at = Some(ts(59));
        let json = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back.updated_at, Some(ts(59)));
    }
}
