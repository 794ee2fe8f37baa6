//! # LedgerSync Engine
//!
//! Version-cursor sync engine for LedgerSync.
//!
//! Clients record ledger transactions on disconnected devices and
//! reconcile later through exactly two operations:
//!
//! - [`SyncService::pull`] asks "what changed since version V": it
//!   returns the owner scope's change-log slice after the caller's
//!   cursor, plus the scope's current maximum version.
//! - [`SyncService::push`] says "here is what I changed offline": it
//!   ingests a batch of records, resolves conflicts last-write-wins per
//!   record, persists accepted writes, and appends one change-log entry
//!   per accepted write.
//!
//! Each owner scope is an independent replication stream with its own
//! strictly increasing version counter, minted only by the change log.
//! The surrounding API layer supplies a pre-validated owner scope; the
//! engine performs no authentication, routing, or transport.
//!
//! # Example
//!
//! ```rust
//! use ledgersync_engine::{EngineConfig, SyncService};
//! use ledgersync_protocol::{EntryKind, Record};
//!
//! let service = SyncService::open(EngineConfig::in_memory()).unwrap();
//!
//! let outcome = service.push("u1", vec![Record::new("u1", EntryKind::Expense, 12.5)]);
//! assert_eq!(outcome.new_version, 1);
//!
//! let delta = service.pull("u1", 0);
//! assert_eq!(delta.changes.len(), 1);
//! assert_eq!(delta.current_version, 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod changelog;
mod config;
mod error;
mod identity;
mod service;

pub use changelog::ChangeLog;
pub use config::{EngineConfig, StoreBackend};
pub use error::{EngineError, EngineResult};
pub use identity::{new_record_id, reconcile_identity, Identity};
pub use service::SyncService;
