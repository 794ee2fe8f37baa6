//! Error types for the sync engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur in the sync engine.
///
/// Nothing here is fatal to the process. During a push, an error is
/// scoped to the single item that raised it; at startup, a store that
/// cannot be opened fails [`SyncService::open`](crate::SyncService::open)
/// as a whole.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The record store failed.
    #[error("store error: {0}")]
    Store(#[from] ledgersync_store::StoreError),

    /// Snapshot serialization failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Reading or writing the change log snapshot failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The change log snapshot on disk is not valid.
    #[error("corrupted change log: {0}")]
    Corrupted(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn store_error_converts() {
        let store_err = ledgersync_store::StoreError::Io(io::Error::new(
            io::ErrorKind::Other,
            "disk gone",
        ));
        let err: EngineError = store_err.into();
        assert!(matches!(err, EngineError::Store(_)));
        assert!(err.to_string().contains("disk gone"));
    }
}
