//! # LedgerSync Protocol
//!
//! Protocol types and conflict policy for LedgerSync.
//!
//! This crate provides:
//! - `Record` for synchronized ledger entries
//! - `ChangeEntry` for the replication change log
//! - Pull/push response messages
//! - The last-write-wins conflict resolver
//!
//! This is a pure protocol crate with no I/O operations. All wire shapes
//! serialize to JSON: entity fields in camelCase, response fields in
//! snake_case, timestamps as ISO-8601 local date-times without a zone
//! offset. Callers are responsible for supplying comparable timestamps.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod conflict;
mod entry;
mod messages;
mod record;

pub use conflict::{resolve, Decision};
pub use entry::{ChangeAction, ChangeEntry, RECORD_ENTITY_TYPE};
pub use messages::{PullResponse, PushResponse};
pub use record::{EntryKind, Record};
