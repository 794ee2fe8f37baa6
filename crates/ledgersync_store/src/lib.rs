//! # LedgerSync Store
//!
//! Record store trait and implementations for LedgerSync.
//!
//! The record store holds the authoritative *current* state of each
//! record, keyed by its globally unique identifier. History belongs to
//! the change log in `ledgersync_engine`; the store only answers "what
//! is this record now" and performs the conditional update that backs
//! last-write-wins ingestion.
//!
//! ## Design principles
//!
//! - Stores are a small capability interface: get, upsert-if-newer,
//!   exists. Nothing else leaks through.
//! - Implementations must be `Send + Sync`; callers share them behind
//!   `Arc<dyn RecordStore>`.
//! - The backend is selected at startup, never hard-wired.
//!
//! ## Available stores
//!
//! - [`MemoryStore`] - for tests and ephemeral deployments
//! - [`FileStore`] - flat-file JSON snapshot that survives restarts
//!
//! ## Example
//!
//! ```rust
//! use ledgersync_protocol::{EntryKind, Record};
//! use ledgersync_store::{MemoryStore, RecordStore};
//!
//! let store = MemoryStore::new();
//! let record = Record::new("u1", EntryKind::Expense, 12.5);
//! let saved = store.upsert_if_newer(&record).unwrap();
//! assert!(saved.is_some());
//! assert!(store.exists(&record.id).unwrap());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod memory;
mod store;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::RecordStore;
