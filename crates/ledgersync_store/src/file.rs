//! Flat-file record store.

use crate::error::{StoreError, StoreResult};
use crate::store::{merge_newer, RecordStore};
use ledgersync_protocol::Record;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A record store persisted as a JSON snapshot file.
///
/// The file holds a serialized list of records. The store keeps an
/// owned, lock-protected in-memory index keyed by identifier; the index
/// is loaded once at open and the whole snapshot is rewritten after
/// every accepted mutation, while the write lock is still held. A
/// failed rewrite rolls the index back, so callers observe either a
/// clean success or a clean failure.
///
/// # Durability
///
/// The snapshot is written to a sibling temp file and renamed into
/// place, so a crash mid-write leaves the previous snapshot intact.
///
/// # Thread safety
///
/// The store is thread-safe and can be shared across threads.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    records: RwLock<HashMap<String, Record>>,
}

impl FileStore {
    /// Opens a store backed by the snapshot at `path`.
    ///
    /// A missing file yields an empty store; the file is created on the
    /// first accepted write. Parent directories are created if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not contain
    /// a valid record list.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut records = HashMap::new();
        if path.exists() {
            let text = fs::read_to_string(path)?;
            let list: Vec<Record> = serde_json::from_str(&text)
                .map_err(|e| StoreError::Corrupted(format!("{}: {e}", path.display())))?;
            for record in list {
                records.insert(record.id.clone(), record);
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            records: RwLock::new(records),
        })
    }

    /// Returns the path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Rewrites the snapshot from the given index. Records are sorted
    /// by identifier so the file is stable across runs.
    fn persist(&self, records: &HashMap<String, Record>) -> StoreResult<()> {
        let mut list: Vec<&Record> = records.values().collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));

        let text = serde_json::to_string_pretty(&list)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl RecordStore for FileStore {
    fn get(&self, id: &str) -> StoreResult<Option<Record>> {
        Ok(self.records.read().get(id).cloned())
    }

    fn upsert_if_newer(&self, record: &Record) -> StoreResult<Option<Record>> {
        let mut records = self.records.write();
        let Some(saved) = merge_newer(records.get(&record.id), record) else {
            return Ok(None);
        };

        let previous = records.insert(saved.id.clone(), saved.clone());
        if let Err(e) = self.persist(&records) {
            // Keep index and snapshot in agreement.
            match previous {
                Some(prev) => records.insert(saved.id.clone(), prev),
                None => records.remove(&saved.id),
            };
            return Err(e);
        }
        Ok(Some(saved))
    }

    fn exists(&self, id: &str) -> StoreResult<bool> {
        Ok(self.records.read().contains_key(id))
    }
}
