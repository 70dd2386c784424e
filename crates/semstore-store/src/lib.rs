//! SemStore Store - durable single-key record persistence
//!
//! Provides:
//! - The `RecordStore` contract the version store persists through
//! - In-memory, filesystem (atomic temp→rename) and SQLite backends
//! - SQLite schema with an embedded, checksummed migration runner

pub mod db;
pub mod errors;
pub mod migrations;
pub mod record;

// Re-export key types
pub use errors::Result;
pub use record::{
    open_record_store, FsRecordStore, MemoryRecordStore, RecordStore, SqliteRecordStore,
    StoreBackend,
};
