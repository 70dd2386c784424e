//! Version store service
//!
//! `VersionStore` is the only way host code changes the version history. Every
//! lifecycle operation runs under the write lock as one read-modify-write:
//!
//! 1. Clone the current ledger (snapshots are `Arc`-shared)
//! 2. `apply()` the command, which re-checks every version invariant
//! 3. Persist the new version list under [`VERSIONS_RECORD_KEY`]
//! 4. Swap the new ledger in
//!
//! A failure at any step leaves both the in-memory ledger and the stored
//! record as they were. Readers take the read lock and so never see a ledger
//! with zero or two active versions halfway through a publish.

use parking_lot::RwLock;
use serde_json::Value;
use std::time::Instant;

use semstore_core::candidate::CandidateReducer;
use semstore_core::diff::VersionDiff;
use semstore_core::errors::Result;
use semstore_core::logging_facility::init as init_logging;
use semstore_core::model::{SemanticVersion, VersionNumber, WorkingCopy};
use semstore_core::snapshot::{build_snapshot, IdAllocator};
use semstore_core::version::{self, apply, VersionCommand, VersionLedger};
use semstore_core::{log_op_end, log_op_error, log_op_start};
use semstore_store::{open_record_store, MemoryRecordStore, RecordStore, StoreBackend};

use crate::config::EngineConfig;

/// Key of the single record holding the whole version history
pub const VERSIONS_RECORD_KEY: &str = "semantic_versions";

pub struct VersionStore {
    ledger: RwLock<VersionLedger>,
    records: Box<dyn RecordStore>,
    ids: IdAllocator,
}

impl VersionStore {
    /// Open a store over `records`, loading any persisted history
    ///
    /// # Errors
    ///
    /// `Storage` if the record cannot be read, `Serialization` if it is not a
    /// version list, `InvariantViolation` if the loaded history is invalid.
    pub fn open(records: Box<dyn RecordStore>) -> Result<Self> {
        let start = Instant::now();
        let backend = records.backend();
        log_op_start!("open_version_store", backend = %backend);

        match load_ledger(records.as_ref()) {
            Ok(ledger) => {
                log_op_end!(
                    "open_version_store",
                    duration_ms = start.elapsed().as_millis() as u64,
                    version_count = ledger.len()
                );
                Ok(Self {
                    ledger: RwLock::new(ledger),
                    records,
                    ids: IdAllocator::new(),
                })
            }
            Err(err) => {
                log_op_error!(
                    "open_version_store",
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }

    /// Empty store backed by process memory
    pub fn in_memory() -> Self {
        Self {
            ledger: RwLock::new(VersionLedger::new()),
            records: Box::new(MemoryRecordStore::new()),
            ids: IdAllocator::new(),
        }
    }

    /// Initialize logging and open the configured backend
    ///
    /// # Errors
    ///
    /// As [`VersionStore::open`], plus `Storage` if the backend cannot be
    /// opened.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        init_logging(config.logging.profile);
        let records = open_record_store(config.storage.backend, config.storage.path.as_deref())?;
        Self::open(records)
    }

    pub fn backend(&self) -> StoreBackend {
        self.records.backend()
    }

    // ----- queries -----

    /// Every version in creation order
    pub fn list_versions(&self) -> Vec<SemanticVersion> {
        self.ledger.read().list_versions().to_vec()
    }

    pub fn get_active(&self) -> Option<SemanticVersion> {
        self.ledger.read().get_active().cloned()
    }

    pub fn get_draft(&self) -> Option<SemanticVersion> {
        self.ledger.read().get_draft().cloned()
    }

    pub fn get_by_id(&self, version_id: &str) -> Option<SemanticVersion> {
        self.ledger.read().get_by_id(version_id).cloned()
    }

    pub fn find_by_version(&self, number: VersionNumber) -> Option<SemanticVersion> {
        self.ledger.read().find_by_version(number).cloned()
    }

    /// Published and deprecated versions, newest first
    pub fn get_history(&self) -> Vec<SemanticVersion> {
        self.ledger
            .read()
            .get_history()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Structural diff between two versions
    ///
    /// # Errors
    ///
    /// `VersionNotFound` if either id is unknown.
    pub fn compare(&self, from_id: &str, to_id: &str) -> Result<VersionDiff> {
        let start = Instant::now();
        log_op_start!("compare", from_version_id = from_id, to_version_id = to_id);

        let result = version::compare(&self.ledger.read(), from_id, to_id);
        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(diff) => log_op_end!(
                "compare",
                duration_ms = duration_ms,
                total_changes = diff.summary.total_changes
            ),
            Err(err) => log_op_error!("compare", err.clone(), duration_ms = duration_ms),
        }
        result
    }

    // ----- lifecycle -----

    /// Build a snapshot from business-object records and store it as the draft
    ///
    /// An existing draft keeps its id and number and gets the new snapshot.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if the records produce duplicate entity ids;
    /// `Storage`/`Serialization` if the new history cannot be persisted.
    pub fn create_draft(&self, records: &[Value]) -> Result<SemanticVersion> {
        let snapshot = build_snapshot(records, &self.ids);
        self.commit(VersionCommand::CreateDraft { snapshot })
    }

    /// Store the accepted part of a working copy as the draft
    ///
    /// # Errors
    ///
    /// As [`VersionStore::create_draft`].
    pub fn create_draft_from_working_copy(&self, copy: &WorkingCopy) -> Result<SemanticVersion> {
        self.create_draft(&copy.to_records())
    }

    /// Store the working copy of a reviewed recognition run as the draft
    ///
    /// # Errors
    ///
    /// As [`VersionStore::create_draft`].
    pub fn create_draft_from_review(&self, reducer: &CandidateReducer) -> Result<SemanticVersion> {
        self.create_draft_from_working_copy(reducer.working_copy())
    }

    /// Publish the draft and make it the active version
    ///
    /// # Errors
    ///
    /// `VersionNotFound`; `InvalidTransition` unless the version is a draft.
    pub fn publish(&self, version_id: &str, change_summary: &str) -> Result<SemanticVersion> {
        self.commit(VersionCommand::Publish {
            version_id: version_id.to_string(),
            change_summary: change_summary.to_string(),
        })
    }

    /// Mark a published, inactive version deprecated
    ///
    /// # Errors
    ///
    /// `VersionNotFound`; `InvalidTransition` if the version is active or
    /// not published.
    pub fn deprecate(&self, version_id: &str) -> Result<SemanticVersion> {
        self.commit(VersionCommand::Deprecate {
            version_id: version_id.to_string(),
        })
    }

    /// Make a published version the active one
    ///
    /// # Errors
    ///
    /// `VersionNotFound`; `InvalidTransition` unless the version is published.
    pub fn set_active(&self, version_id: &str) -> Result<SemanticVersion> {
        self.commit(VersionCommand::SetActive {
            version_id: version_id.to_string(),
        })
    }

    /// Replace the draft with a copy of an earlier version's snapshot
    ///
    /// # Errors
    ///
    /// `VersionNotFound` if the target is unknown.
    pub fn rollback(&self, version_id: &str) -> Result<SemanticVersion> {
        self.commit(VersionCommand::Rollback {
            version_id: version_id.to_string(),
        })
    }

    fn commit(&self, cmd: VersionCommand) -> Result<SemanticVersion> {
        let op = cmd.op_name();
        let target = cmd.version_id().unwrap_or("-").to_string();
        let start = Instant::now();
        log_op_start!(op, version_id = target.as_str());

        let result = self.commit_locked(cmd);
        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(affected) => log_op_end!(
                op,
                duration_ms = duration_ms,
                version_id = affected.version_id.as_str(),
                version = %affected.version
            ),
            Err(err) => log_op_error!(
                op,
                err.clone(),
                duration_ms = duration_ms,
                version_id = target.as_str()
            ),
        }
        result
    }

    fn commit_locked(&self, cmd: VersionCommand) -> Result<SemanticVersion> {
        let mut ledger = self.ledger.write();
        let (next, affected) = apply(ledger.clone(), cmd)?;
        let payload = serde_json::to_string(next.list_versions())?;
        self.records.replace(VERSIONS_RECORD_KEY, &payload)?;
        *ledger = next;
        Ok(affected)
    }
}

fn load_ledger(records: &dyn RecordStore) -> Result<VersionLedger> {
    match records.load(VERSIONS_RECORD_KEY)? {
        Some(payload) => {
            let versions: Vec<SemanticVersion> = serde_json::from_str(&payload)?;
            tracing::debug!(count = versions.len(), "loaded persisted versions");
            VersionLedger::from_versions(versions)
        }
        None => Ok(VersionLedger::new()),
    }
}
