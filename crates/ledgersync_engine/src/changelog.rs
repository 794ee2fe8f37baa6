//! Per-scope append-only change log.

use crate::error::{EngineError, EngineResult};
use ledgersync_protocol::ChangeEntry;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// One owner scope's slice of the log.
#[derive(Debug, Default)]
struct ScopeLog {
    /// Entries in append (and therefore version) order.
    entries: Vec<ChangeEntry>,
    /// Highest allocated version. Equal to the last entry's version.
    max_version: u64,
}

/// The replication backbone: an append-only change log partitioned by
/// owner scope.
///
/// The log exclusively owns version allocation; no other component may
/// mint a version. Within a scope, versions are strictly increasing and
/// unique (gap-free is not promised); across scopes the streams are
/// fully independent.
///
/// A log created with [`new`](Self::new) is volatile. A log opened with
/// [`open`](Self::open) is backed by a JSON snapshot file: history is
/// reloaded at open, with each scope's `max_version` restored, and the
/// snapshot is rewritten after every append while the write lock is
/// still held. A failed rewrite rolls the append back, so no version is
/// consumed and no entry exists.
///
/// # Invariants
///
/// - Entries are never mutated or deleted after append.
/// - `max_version` never decreases and always equals the version of the
///   last appended entry for the scope, including across reopens of a
///   file-backed log.
/// - Appends are linearizable per scope: two concurrent appends never
///   receive the same version.
#[derive(Debug, Default)]
pub struct ChangeLog {
    scopes: RwLock<HashMap<String, ScopeLog>>,
    path: Option<PathBuf>,
}

impl ChangeLog {
    /// Creates an empty volatile change log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a change log backed by the snapshot at `path`.
    ///
    /// A missing file yields an empty log; the file is created on the
    /// first append. Parent directories are created if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not contain
    /// a valid per-scope entry map.
    pub fn open(path: &Path) -> EngineResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut scopes = HashMap::new();
        if path.exists() {
            let text = fs::read_to_string(path)?;
            let loaded: HashMap<String, Vec<ChangeEntry>> = serde_json::from_str(&text)
                .map_err(|e| EngineError::Corrupted(format!("{}: {e}", path.display())))?;
            for (scope, entries) in loaded {
                let max_version = entries.iter().map(|e| e.version).max().unwrap_or(0);
                scopes.insert(
                    scope,
                    ScopeLog {
                        entries,
                        max_version,
                    },
                );
            }
        }

        Ok(Self {
            scopes: RwLock::new(scopes),
            path: Some(path.to_path_buf()),
        })
    }

    /// Appends `entry` to the scope, allocating the next version.
    ///
    /// The entry's `version` field is overwritten with `max + 1` (1 for
    /// an empty scope). Returns the allocated version. For a volatile
    /// log the append cannot fail; for a file-backed log a failed
    /// snapshot rewrite rolls the entry back and returns the error, so
    /// the failed append consumes no version.
    pub fn append(&self, scope: &str, mut entry: ChangeEntry) -> EngineResult<u64> {
        let mut scopes = self.scopes.write();
        let log = scopes.entry(scope.to_string()).or_default();
        log.max_version += 1;
        entry.version = log.max_version;
        log.entries.push(entry);
        let version = log.max_version;

        if let Err(e) = self.persist(&scopes) {
            // Keep the in-memory log and the snapshot in agreement.
            if let Some(log) = scopes.get_mut(scope) {
                log.entries.pop();
                log.max_version -= 1;
            }
            return Err(e);
        }
        Ok(version)
    }

    /// Returns entries with `version > since`, ascending by version.
    /// `since = 0` returns the scope's full history.
    pub fn query(&self, scope: &str, since: u64) -> Vec<ChangeEntry> {
        let scopes = self.scopes.read();
        match scopes.get(scope) {
            Some(log) => log
                .entries
                .iter()
                .filter(|e| e.version > since)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Returns the scope's highest allocated version, 0 if the scope
    /// has no entries.
    pub fn max_version(&self, scope: &str) -> u64 {
        self.scopes
            .read()
            .get(scope)
            .map_or(0, |log| log.max_version)
    }

    /// Returns `(query(scope, since), max_version(scope))` under a
    /// single lock acquisition, so the reported maximum can never lag
    /// behind the last returned entry.
    pub fn delta(&self, scope: &str, since: u64) -> (Vec<ChangeEntry>, u64) {
        let scopes = self.scopes.read();
        match scopes.get(scope) {
            Some(log) => {
                let changes = log
                    .entries
                    .iter()
                    .filter(|e| e.version > since)
                    .cloned()
                    .collect();
                (changes, log.max_version)
            }
            None => (Vec::new(), 0),
        }
    }

    /// Rewrites the snapshot, if this log is file-backed. Scopes are
    /// sorted so the file is stable across runs.
    fn persist(&self, scopes: &HashMap<String, ScopeLog>) -> EngineResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let snapshot: BTreeMap<&str, &[ChangeEntry]> = scopes
            .iter()
            .map(|(scope, log)| (scope.as_str(), log.entries.as_slice()))
            .collect();
        let text = serde_json::to_string_pretty(&snapshot)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
