//! Response messages for the pull/push cursor protocol.

use crate::entry::ChangeEntry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response to a pull: the changes after the caller's cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullResponse {
    /// Change entries with `version > since`, ascending by version.
    pub changes: Vec<ChangeEntry>,
    /// The scope's maximum version, read after `changes`. Never lower
    /// than the version of the last returned entry; clients persist it
    /// as their next cursor.
    pub current_version: u64,
}

impl PullResponse {
    /// Creates a pull response.
    pub fn new(changes: Vec<ChangeEntry>, current_version: u64) -> Self {
        Self {
            changes,
            current_version,
        }
    }
}

/// Response to a push: per-item outcomes and the scope's new cursor.
///
/// A record that lost conflict resolution appears in *neither*
/// `success_ids` nor `failed_ids`; the stored state silently won.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushResponse {
    /// Identifiers of records that were accepted and logged.
    pub success_ids: Vec<String>,
    /// Identifiers of records that errored during processing.
    pub failed_ids: Vec<String>,
    /// Client-supplied identifier to server identifier, for records
    /// that arrived with a non-empty id. Server-assigned ids for
    /// identity-less records are reported via `success_ids` only.
    pub id_mapping: HashMap<String, String>,
    /// `max_version` of the scope after the whole batch.
    pub new_version: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{ChangeAction, ChangeEntry, RECORD_ENTITY_TYPE};

    #[test]
    fn pull_response_wire_shape() {
        let mut entry =
            ChangeEntry::new("r1", "u1", ChangeAction::Add, RECORD_ENTITY_TYPE, "{}");
        entry.version = 3;

        let response = PullResponse::new(vec![entry], 3);
        let json: serde_json::Value = serde_json::to_value(&response).unwrap();

        assert_eq!(json["current_version"], 3);
        assert_eq!(json["changes"][0]["version"], 3);
    }

    #[test]
    fn push_response_wire_shape() {
        let response = PushResponse {
            success_ids: vec!["server-1".into()],
            failed_ids: Vec::new(),
            id_mapping: HashMap::from([("client-1".into(), "server-1".into())]),
            new_version: 5,
        };

        let json: serde_json::Value = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success_ids"][0], "server-1");
        assert_eq!(json["failed_ids"].as_array().unwrap().len(), 0);
        assert_eq!(json["id_mapping"]["client-1"], "server-1");
        assert_eq!(json["new_version"], 5);
    }

    #[test]
    fn push_response_default_is_empty() {
        let response = PushResponse::default();
        assert!(response.success_ids.is_empty());
        assert!(response.failed_ids.is_empty());
        assert!(response.id_mapping.is_empty());
        assert_eq!(response.new_version, 0);
    }
}
