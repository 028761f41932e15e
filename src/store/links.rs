use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{instrument, warn};

use crate::errors::StoreError;
use crate::models::short_url::ShortUrlRecord;

/// How often a mutation re-reads the slot after losing a compare-and-swap
/// before giving up with [`StoreError::ConcurrentWrite`].
const CAS_RETRIES: usize = 3;

/// Entry handed to [`LinkStore::append`]; the store assigns the `id`.
#[derive(Debug, Clone)]
pub struct NewShortUrl {
    pub code: String,
    pub original_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

/// The local collection of saved short URLs.
///
/// Everything lives in a single slot file holding a JSON array of
/// [`ShortUrlRecord`]. The slot is owned entirely by this client; deleting it
/// does not delete anything on the backend. Writers in this process are
/// serialized by a mutex; a writer from another process is detected by
/// comparing the slot's bytes against the snapshot the mutation was computed
/// from, and the mutation is retried against fresh state.
#[derive(Clone, Debug)]
pub struct LinkStore {
    path: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

struct Snapshot {
    records: Vec<ShortUrlRecord>,
    raw: Option<String>,
}

impl LinkStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path: Arc::new(path),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Read the slot. An absent slot is an empty collection; a slot that no
    /// longer parses is treated as corrupt, removed, and reported as empty.
    /// Never errors to the caller.
    pub fn load(&self) -> Vec<ShortUrlRecord> {
        let _guard = self.lock();
        self.load_snapshot().records
    }

    /// Append a record with `id = len + 1` and persist the new collection.
    ///
    /// Rejects a `code` that is already saved rather than trusting callers to
    /// check first.
    #[instrument(name = "Store: Append short URL", skip(self, new), fields(code = %new.code))]
    pub fn append(&self, new: NewShortUrl) -> Result<Vec<ShortUrlRecord>, StoreError> {
        let _guard = self.lock();
        for _ in 0..CAS_RETRIES {
            let Snapshot { mut records, raw } = self.load_snapshot();
            if records.iter().any(|record| record.code == new.code) {
                return Err(StoreError::DuplicateCode(new.code.clone()));
            }
            records.push(ShortUrlRecord {
                id: records.len() as u32 + 1,
                code: new.code.clone(),
                original_url: new.original_url.clone(),
                short_url: new.short_url.clone(),
                created_at: new.created_at,
            });
            if self.persist_if_current(raw.as_deref(), &records)? {
                return Ok(records);
            }
        }
        Err(StoreError::ConcurrentWrite)
    }

    /// Drop any record with the given `code`. When the last record goes, the
    /// slot file is removed entirely rather than left as an empty array.
    #[instrument(name = "Store: Remove short URL", skip(self))]
    pub fn remove(&self, code: &str) -> Result<Vec<ShortUrlRecord>, StoreError> {
        let _guard = self.lock();
        for _ in 0..CAS_RETRIES {
            let Snapshot { records, raw } = self.load_snapshot();
            let filtered: Vec<ShortUrlRecord> = records
                .into_iter()
                .filter(|record| record.code != code)
                .collect();
            let done = if filtered.is_empty() {
                self.remove_if_current(raw.as_deref())?
            } else {
                self.persist_if_current(raw.as_deref(), &filtered)?
            };
            if done {
                return Ok(filtered);
            }
        }
        Err(StoreError::ConcurrentWrite)
    }

    /// Remove the slot unconditionally.
    #[instrument(name = "Store: Clear short URLs", skip(self))]
    pub fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.lock();
        match fs::remove_file(self.path.as_ref()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load_snapshot(&self) -> Snapshot {
        let raw = match fs::read_to_string(self.path.as_ref()) {
            Ok(raw) => raw,
            Err(_) => {
                return Snapshot {
                    records: Vec::new(),
                    raw: None,
                };
            }
        };
        match serde_json::from_str(&raw) {
            Ok(records) => Snapshot {
                records,
                raw: Some(raw),
            },
            Err(err) => {
                warn!("Discarding corrupt slot {}: {err}", self.path.display());
                let _ = fs::remove_file(self.path.as_ref());
                Snapshot {
                    records: Vec::new(),
                    raw: None,
                }
            }
        }
    }

    /// Persist `records` only if the slot still holds the bytes the mutation
    /// started from. Returns `false` when a foreign writer got there first.
    fn persist_if_current(
        &self,
        expected: Option<&str>,
        records: &[ShortUrlRecord],
    ) -> Result<bool, StoreError> {
        if self.read_raw().as_deref() != expected {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string(records)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serialized)?;
        fs::rename(&tmp, self.path.as_ref())?;
        Ok(true)
    }

    fn remove_if_current(&self, expected: Option<&str>) -> Result<bool, StoreError> {
        if self.read_raw().as_deref() != expected {
            return Ok(false);
        }
        match fs::remove_file(self.path.as_ref()) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(true),
            Err(err) => Err(err.into()),
        }
    }

    fn read_raw(&self) -> Option<String> {
        fs::read_to_string(self.path.as_ref()).ok()
    }
}
