//! Filesystem record store
//!
//! One file per record at `<root>/<key>.json`, written with temp→rename.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::atomic::atomic_write;
use super::{validate_key, RecordStore, StoreBackend};
use crate::errors::{io_error, Result};

#[derive(Debug)]
pub struct FsRecordStore {
    root: PathBuf,
}

impl FsRecordStore {
    /// Open (creating if needed) a record directory
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| io_error("create_record_root", e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl RecordStore for FsRecordStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        match fs::read_to_string(self.record_path(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("read_record", e).with_entity_id(key)),
        }
    }

    fn replace(&self, key: &str, payload: &str) -> Result<()> {
        validate_key(key)?;
        atomic_write(&self.record_path(key), payload.as_bytes())
            .map_err(|e| e.with_entity_id(key))
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Filesystem
    }
}
