use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::crypto::Vault;
use crate::error::{AuthError, AuthResult};
use crate::lock::LockRecord;

/**
    Persistence boundary for sealed lock records.

    Records are keyed by their sealed mac id. Vault encryption is
    deterministic, so a plaintext mac id can be located by sealing it with
    the same storage vault, see [`fetch_lock`].
*/
pub trait LockStore: Send + Sync {
    /// Insert or replace the record with the same sealed mac id.
    fn persist(&self, record: &LockRecord) -> AuthResult<()>;

    /// Look up a record by sealed mac id.
    fn fetch(&self, sealed_mac_id: &str) -> AuthResult<Option<LockRecord>>;
}

/**
    Look up a lock by plaintext mac id.
*/
pub fn fetch_lock(
    store: &dyn LockStore,
    storage: &Vault,
    mac_id: &str,
) -> AuthResult<Option<LockRecord>> {
    if mac_id.is_empty() {
        return Err(AuthError::EmptyField("mac_id"));
    }
    store.fetch(&storage.encrypt_value(mac_id))
}

/**
    Process-local store.
*/
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, LockRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Every write is a single insert, so a panicked holder cannot leave
    // the table half-updated.
    fn records(&self) -> MutexGuard<'_, HashMap<String, LockRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LockStore for MemoryStore {
    fn persist(&self, record: &LockRecord) -> AuthResult<()> {
        self.records().insert(record.mac_id.clone(), record.clone());
        Ok(())
    }

    fn fetch(&self, sealed_mac_id: &str) -> AuthResult<Option<LockRecord>> {
        Ok(self.records().get(sealed_mac_id).cloned())
    }
}

/**
    Store backed by a JSON array of records on disk.

    The whole file is rewritten on each persist; writers in one process
    are serialized. A missing file reads as an empty store.
*/
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> AuthResult<Vec<LockRecord>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AuthError::file_io(&self.path, e)),
        };
        serde_json::from_slice(&data).map_err(|e| self.malformed(e))
    }

    fn malformed(&self, err: serde_json::Error) -> AuthError {
        AuthError::RecordFileMalformed {
            path: self.path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

impl LockStore for JsonFileStore {
    fn persist(&self, record: &LockRecord) -> AuthResult<()> {
        // The guard protects no data; the file itself is rewritten atomically.
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut records = self.load()?;
        match records.iter_mut().find(|r| r.mac_id == record.mac_id) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }

        let json = serde_json::to_vec_pretty(&records)
            .map_err(|e| self.malformed(e))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| AuthError::file_io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| AuthError::file_io(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), records = records.len(), "persisted lock record");
        Ok(())
    }

    fn fetch(&self, sealed_mac_id: &str) -> AuthResult<Option<LockRecord>> {
        Ok(self
            .load()?
            .into_iter()
            .find(|r| r.mac_id == sealed_mac_id))
    }
}
