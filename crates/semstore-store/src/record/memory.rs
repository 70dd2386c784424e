use parking_lot::Mutex;
use std::collections::HashMap;

use super::{validate_key, RecordStore, StoreBackend};
use crate::errors::Result;

/// Process-local record store, lost on drop
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.records.lock().get(key).cloned())
    }

    fn replace(&self, key: &str, payload: &str) -> Result<()> {
        validate_key(key)?;
        self.records
            .lock()
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }
}
