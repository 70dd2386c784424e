//! SemStore Engine - composition root
//!
//! Wires the pure version kernel in `semstore-core` to a durable record store
//! from `semstore-store`:
//! - Layered configuration (`EngineConfig`)
//! - `VersionStore`, the concurrent service every host call goes through
//! - Boundary logging for every lifecycle operation

pub mod config;
pub mod version_store;

pub use config::{EngineConfig, LoggingConfig, StorageConfig};
pub use version_store::{VersionStore, VERSIONS_RECORD_KEY};
