//! SemStore Core - semantic version kernel
//!
//! This crate provides the pure, I/O-free part of the semantic version store:
//! - Snapshot data model (business objects, fields, relations)
//! - Snapshot Builder for loosely-typed business-object records
//! - Structural Diff Engine between two snapshots
//! - Version ledger with the lifecycle command boundary (`apply`)
//! - Candidate Reducer deriving the working copy from accept/reject decisions
//! - Version invariants and working-copy completeness checks
//! - Error and logging facilities shared with the store and engine crates

pub mod candidate;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;
pub mod snapshot;
pub mod version;

// Re-export commonly used types
pub use candidate::{derive_working_copy, CandidateReducer};
pub use diff::{compute_diff, VersionDiff};
pub use errors::{ExError, ExErrorKind, Result, SemStoreError};
pub use model::{
    SemanticSnapshot, SemanticVersion, VersionNumber, VersionStatus, WorkingCopy,
};
pub use snapshot::{build_snapshot, IdAllocator};
pub use version::{apply, VersionCommand, VersionLedger};
