//! Engine configuration.

use std::path::PathBuf;

/// Which record store backs the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-memory store; state is lost when the process exits.
    Memory,
    /// Flat-file JSON snapshots under the given data directory. Both
    /// the record store and the change log are persisted there.
    File(PathBuf),
}

/// Configuration for the sync engine.
///
/// The record store is a startup decision, never hard-wired: pick a
/// backend here, or hand [`SyncService::with_store`](crate::SyncService::with_store)
/// any other [`RecordStore`](ledgersync_store::RecordStore) implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// The record store backend.
    pub store: StoreBackend,
}

impl EngineConfig {
    /// Configuration backed by an in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            store: StoreBackend::Memory,
        }
    }

    /// Configuration backed by flat-file snapshots under the data
    /// directory `dir`.
    pub fn file(dir: impl Into<PathBuf>) -> Self {
        Self {
            store: StoreBackend::File(dir.into()),
        }
    }

    /// Replaces the store backend.
    #[must_use]
    pub fn with_store(mut self, store: StoreBackend) -> Self {
        self.store = store;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}
