//! Single-key durable record storage
//!
//! A record is an opaque UTF-8 payload stored under a short key and replaced
//! wholesale on every write. The version store keeps its whole history in one
//! record, so a backend only needs atomic whole-record replacement.

mod atomic;
mod fs_record;
mod memory;
mod sqlite_record;

pub use atomic::atomic_write;
pub use fs_record::FsRecordStore;
pub use memory::MemoryRecordStore;
pub use sqlite_record::SqliteRecordStore;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::errors::{invalid_key, missing_path, Result};

/// Durable single-key record store
///
/// `replace` must be atomic: after a crash a reader sees either the old
/// payload or the new one, never a mix.
pub trait RecordStore: Send + Sync {
    /// Read the payload stored under `key`, if any
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Atomically replace the payload stored under `key`
    fn replace(&self, key: &str, payload: &str) -> Result<()>;

    /// Which backend this is
    fn backend(&self) -> StoreBackend;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Filesystem,
    Sqlite,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Filesystem => "filesystem",
            StoreBackend::Sqlite => "sqlite",
        };
        f.write_str(s)
    }
}

/// Open the configured backend
///
/// `path` is the root directory for `filesystem` and the database file for
/// `sqlite` (an in-memory database when absent). `memory` ignores it.
///
/// # Errors
///
/// `InvalidInput` when `filesystem` has no path; `Io`/`Persistence` when the
/// backend cannot be opened.
pub fn open_record_store(
    backend: StoreBackend,
    path: Option<&Path>,
) -> Result<Box<dyn RecordStore>> {
    tracing::debug!(%backend, path = ?path, "opening record store");
    match backend {
        StoreBackend::Memory => Ok(Box::new(MemoryRecordStore::new())),
        StoreBackend::Filesystem => {
            let root = path.ok_or_else(|| missing_path("filesystem"))?;
            Ok(Box::new(FsRecordStore::open(root)?))
        }
        StoreBackend::Sqlite => match path {
            Some(db_path) => Ok(Box::new(SqliteRecordStore::open(db_path)?)),
            None => Ok(Box::new(SqliteRecordStore::open_in_memory()?)),
        },
    }
}

/// Keys double as file names, so they are restricted to a portable subset
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(invalid_key(key))
    }
}
