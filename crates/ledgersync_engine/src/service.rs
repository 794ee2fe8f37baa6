//! The sync service: push ingestion and pull.

use crate::changelog::ChangeLog;
use crate::config::{EngineConfig, StoreBackend};
use crate::error::EngineResult;
use crate::identity::{reconcile_identity, Identity};
use chrono::Local;
use ledgersync_protocol::{resolve, ChangeAction, ChangeEntry, Decision, PullResponse, PushResponse, Record};
use ledgersync_store::{FileStore, MemoryStore, RecordStore};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// Record snapshot file name inside a file backend's data directory.
const RECORDS_FILE: &str = "records.json";
/// Change log snapshot file name inside a file backend's data directory.
const CHANGELOG_FILE: &str = "changelog.json";

/// The synchronization engine.
///
/// Exposes exactly two operations to the surrounding API layer, both
/// scoped by a pre-validated owner identifier: [`pull`](Self::pull) and
/// [`push`](Self::push). The service owns the change log and shares a
/// [`RecordStore`] with nobody else's writers.
///
/// Concurrent pushes to the same scope serialize on a per-scope ingest
/// lock; pushes to different scopes proceed in parallel. Pulls never
/// block on pushes beyond the change log's internal read lock.
pub struct SyncService {
    store: Arc<dyn RecordStore>,
    log: ChangeLog,
    ingest_locks: RwLock<HashMap<String, Arc<Mutex<()>>>>,
}

impl SyncService {
    /// Opens a service with the store backend selected in `config`.
    ///
    /// A file backend names a data directory; the record snapshot and
    /// the change log snapshot both live there, so records and their
    /// replication history survive a restart together.
    ///
    /// # Errors
    ///
    /// Returns an error if a file-backed store or change log cannot be
    /// opened. This is the one call-level failure: once the service is
    /// up, failures are scoped to individual push items.
    pub fn open(config: EngineConfig) -> EngineResult<Self> {
        match config.store {
            StoreBackend::Memory => Ok(Self::with_store(Arc::new(MemoryStore::new()))),
            StoreBackend::File(dir) => {
                let store = Arc::new(FileStore::open(&dir.join(RECORDS_FILE))?);
                let log = ChangeLog::open(&dir.join(CHANGELOG_FILE))?;
                Ok(Self {
                    store,
                    log,
                    ingest_locks: RwLock::new(HashMap::new()),
                })
            }
        }
    }

    /// Creates a service over an externally constructed record store.
    /// The change log is volatile; use [`open`](Self::open) with a file
    /// backend for a durable one.
    pub fn with_store(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            log: ChangeLog::new(),
            ingest_locks: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the scope's changes after `last_version`, plus the
    /// scope's current maximum version.
    ///
    /// A negative cursor is treated as 0, not an error; the protocol is
    /// permissive toward clients with no (or a damaged) watermark.
    /// Repeated calls with the same cursor and no intervening push
    /// return identical results. Pull reads only the change log: the
    /// entry payloads are self-sufficient snapshots.
    pub fn pull(&self, scope: &str, last_version: i64) -> PullResponse {
        let since = u64::try_from(last_version).unwrap_or(0);
        let (changes, current_version) = self.log.delta(scope, since);
        tracing::debug!(scope, since, count = changes.len(), "pull");
        PullResponse::new(changes, current_version)
    }

    /// Ingests a batch of client records for `scope`.
    ///
    /// Items are processed in input order, each committed individually;
    /// partial success is normal. Per item:
    ///
    /// 1. the owner field is forced to `scope`;
    /// 2. a missing `updated_at` is stamped with the server clock
    ///    (clients should supply their own, but an unstamped write is
    ///    tolerated and treated as freshest);
    /// 3. an empty identifier gets a fresh server-assigned one;
    /// 4. the conflict resolver decides: accepted writes go to the
    ///    record store and append an ADD or UPDATE entry; a write that
    ///    loses appears in *neither* `success_ids` nor `failed_ids`;
    /// 5. an error fails only that item and processing continues.
    ///
    /// `new_version` is the scope's maximum version after the whole
    /// batch.
    pub fn push(&self, scope: &str, records: Vec<Record>) -> PushResponse {
        let ingest = self.ingest_lock(scope);
        let _guard = ingest.lock();

        let mut response = PushResponse::default();
        for mut record in records {
            // No client may write into another owner's stream.
            record.user_id = scope.to_string();
            if record.updated_at.is_none() {
                record.updated_at = Some(Local::now().naive_local());
            }
            let identity = reconcile_identity(&mut record);

            match self.apply_one(scope, &record) {
                Ok(Some(version)) => {
                    response.success_ids.push(record.id.clone());
                    if let Identity::Client(client_id) = identity {
                        response.id_mapping.insert(client_id, record.id.clone());
                    }
                    tracing::debug!(scope, id = %record.id, version, "write accepted");
                }
                Ok(None) => {
                    tracing::debug!(scope, id = %record.id, "stale write ignored");
                }
                Err(e) => {
                    tracing::warn!(scope, id = %record.id, error = %e, "push item failed");
                    response.failed_ids.push(record.id.clone());
                }
            }
        }

        response.new_version = self.log.max_version(scope);
        response
    }

    /// Applies one normalized record. Returns the allocated version,
    /// or `None` when the stored state won.
    ///
    /// The store write commits before the log append, and a failed
    /// append rolls itself back, so a failed item never consumes a
    /// version and leaves no entry.
    fn apply_one(&self, scope: &str, record: &Record) -> EngineResult<Option<u64>> {
        let existing = self.store.get(&record.id)?;
        if resolve(record, existing.as_ref()) == Decision::Reject {
            return Ok(None);
        }
        let action = if existing.is_some() {
            ChangeAction::Update
        } else {
            ChangeAction::Add
        };

        let Some(saved) = self.store.upsert_if_newer(record)? else {
            // The store re-checks; under the ingest lock this only
            // triggers if the resolver and store disagree on a tie.
            return Ok(None);
        };

        let entry = ChangeEntry::for_record(&saved, action)?;
        Ok(Some(self.log.append(scope, entry)?))
    }

    fn ingest_lock(&self, scope: &str) -> Arc<Mutex<()>> {
        if let Some(lock) = self.ingest_locks.read().get(scope) {
            return Arc::clone(lock);
        }
        let mut locks = self.ingest_locks.write();
        Arc::clone(locks.entry(scope.to_string()).or_default())
    }
}
