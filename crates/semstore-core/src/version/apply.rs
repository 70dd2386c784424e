//! Functional-boundary apply function
//!
//! ## Atomicity Contract
//!
//! - **All-or-nothing**: a command either returns a new ledger that passes
//!   every version invariant, or an error. The ledger is taken by value, so a
//!   caller that wants to keep the old state on error clones it first
//!   (snapshots are `Arc`-shared, so the clone is shallow).
//! - **No panics**: invalid requests return typed errors.
//! - **Immutable history**: no command writes through the snapshot of a
//!   published or deprecated version.
//!
//! ## Example
//!
//! ```
//! use semstore_core::version::{apply, VersionCommand, VersionLedger};
//! use semstore_core::model::SemanticSnapshot;
//!
//! let (ledger, draft) = apply(
//!     VersionLedger::new(),
//!     VersionCommand::CreateDraft { snapshot: SemanticSnapshot::default() },
//! )
//! .unwrap();
//! let (ledger, published) = apply(
//!     ledger,
//!     VersionCommand::Publish {
//!         version_id: draft.version_id.clone(),
//!         change_summary: "initial".to_string(),
//!     },
//! )
//! .unwrap();
//! assert_eq!(published.version.to_string(), "1.0.0");
//! assert!(ledger.get_active().is_some());
//! ```

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::commands::VersionCommand;
use super::ledger::VersionLedger;
use super::numbering::next_version_number;
use crate::diff::{compute_diff, VersionDiff};
use crate::errors::{Result, SemStoreError, TransitionState};
use crate::model::{SemanticSnapshot, SemanticVersion, VersionStatus};
use crate::rules::validation;

/// Apply a lifecycle command, returning the new ledger and the affected version
///
/// # Errors
///
/// - `VersionNotFound` - the addressed version does not exist
/// - `InvalidTransition` - the version is in the wrong lifecycle state
/// - `InvariantViolation` - the resulting ledger would break a version
///   invariant (for example duplicate entity ids in a new snapshot)
pub fn apply(
    mut ledger: VersionLedger,
    cmd: VersionCommand,
) -> Result<(VersionLedger, SemanticVersion)> {
    let index = match cmd {
        VersionCommand::CreateDraft { snapshot } => create_draft(&mut ledger, snapshot)?,
        VersionCommand::Publish {
            version_id,
            change_summary,
        } => publish(&mut ledger, &version_id, change_summary)?,
        VersionCommand::Deprecate { version_id } => deprecate(&mut ledger, &version_id)?,
        VersionCommand::SetActive { version_id } => set_active(&mut ledger, &version_id)?,
        VersionCommand::Rollback { version_id } => rollback(&mut ledger, &version_id)?,
    };

    validation::validate_versions(ledger.list_versions())?;
    ledger.reindex();

    let affected = ledger
        .list_versions()
        .get(index)
        .cloned()
        .ok_or_else(|| SemStoreError::InvariantViolation {
            details: format!("affected version index {} out of range", index),
        })?;
    Ok((ledger, affected))
}

/// Structural diff from version `from_id` to version `to_id`
///
/// # Errors
///
/// `VersionNotFound` if either id is unknown.
pub fn compare(ledger: &VersionLedger, from_id: &str, to_id: &str) -> Result<VersionDiff> {
    let from = ledger
        .get_by_id(from_id)
        .ok_or_else(|| SemStoreError::not_found(from_id))?;
    let to = ledger
        .get_by_id(to_id)
        .ok_or_else(|| SemStoreError::not_found(to_id))?;
    Ok(compute_diff(&from.snapshot, &to.snapshot))
}

fn create_draft(ledger: &mut VersionLedger, snapshot: SemanticSnapshot) -> Result<usize> {
    if let Some(existing) = ledger.get_draft().map(|d| d.version_id.clone()) {
        // Draft exists: replace its snapshot in place, keep id and number.
        let versions = ledger.versions_mut();
        if let Some(index) = versions.iter().position(|v| v.version_id == existing) {
            let draft = &mut versions[index];
            draft.stats = Some(snapshot.stats());
            draft.snapshot = Arc::new(snapshot);
            tracing::debug!(version_id = %draft.version_id, "draft snapshot replaced");
            return Ok(index);
        }
    }

    let number = next_version_number(ledger.list_versions())?;
    let draft = SemanticVersion::new_draft(Uuid::now_v7().to_string(), number, snapshot);
    tracing::debug!(version_id = %draft.version_id, version = %number, "draft created");
    let versions = ledger.versions_mut();
    versions.push(draft);
    Ok(versions.len() - 1)
}

fn publish(ledger: &mut VersionLedger, version_id: &str, change_summary: String) -> Result<usize> {
    let index = ledger.index_of(version_id)?;
    let versions = ledger.versions_mut();

    let status = versions[index].status;
    if status != VersionStatus::Draft {
        return Err(SemStoreError::InvalidTransition {
            version_id: version_id.to_string(),
            action: "publish",
            state: TransitionState::Status(status),
        });
    }

    for v in versions.iter_mut() {
        v.is_active = false;
    }
    let target = &mut versions[index];
    target.status = VersionStatus::Published;
    target.is_active = true;
    target.published_at = Some(Utc::now());
    // An empty summary keeps the one recorded at rollback.
    if !change_summary.is_empty() || target.change_summary.is_none() {
        target.change_summary = Some(change_summary).filter(|s| !s.is_empty());
    }
    Ok(index)
}

fn deprecate(ledger: &mut VersionLedger, version_id: &str) -> Result<usize> {
    let index = ledger.index_of(version_id)?;
    let target = &mut ledger.versions_mut()[index];

    if target.is_active {
        return Err(SemStoreError::InvalidTransition {
            version_id: version_id.to_string(),
            action: "deprecate",
            state: TransitionState::Active,
        });
    }
    if target.status != VersionStatus::Published {
        return Err(SemStoreError::InvalidTransition {
            version_id: version_id.to_string(),
            action: "deprecate",
            state: TransitionState::Status(target.status),
        });
    }

    target.status = VersionStatus::Deprecated;
    target.deprecated_at = Some(Utc::now());
    Ok(index)
}

fn set_active(ledger: &mut VersionLedger, version_id: &str) -> Result<usize> {
    let index = ledger.index_of(version_id)?;
    let versions = ledger.versions_mut();

    let status = versions[index].status;
    if status != VersionStatus::Published {
        return Err(SemStoreError::InvalidTransition {
            version_id: version_id.to_string(),
            action: "activate",
            state: TransitionState::Status(status),
        });
    }

    for (i, v) in versions.iter_mut().enumerate() {
        v.is_active = i == index;
    }
    Ok(index)
}

fn rollback(ledger: &mut VersionLedger, version_id: &str) -> Result<usize> {
    let index = ledger.index_of(version_id)?;
    let target = &ledger.list_versions()[index];
    let target_number = target.version;
    // Structural deep copy; the new draft shares nothing with history.
    let snapshot: SemanticSnapshot = (*target.snapshot).clone();

    let versions = ledger.versions_mut();
    versions.retain(|v| !v.is_draft());

    let number = next_version_number(versions)?;
    let mut draft = SemanticVersion::new_draft(Uuid::now_v7().to_string(), number, snapshot);
    draft.change_summary = Some(format!("Rollback from {}", target_number));
    tracing::debug!(
        version_id = %draft.version_id,
        version = %number,
        from = %target_number,
        "rollback draft created"
    );
    versions.push(draft);
    Ok(versions.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;
    use crate::model::VersionNumber;
    use crate::snapshot::{build_snapshot, IdAllocator};
    use serde_json::json;

    fn snapshot(ids: &IdAllocator, objects: &[&str]) -> SemanticSnapshot {
        let records: Vec<_> = objects
            .iter()
            .map(|id| json!({"id": id, "label": id, "fields": []}))
            .collect();
        build_snapshot(&records, ids)
    }

    fn draft_and_publish(ledger: VersionLedger, snap: SemanticSnapshot) -> (VersionLedger, SemanticVersion) {
        let (ledger, draft) = apply(ledger, VersionCommand::CreateDraft { snapshot: snap }).unwrap();
        apply(
            ledger,
            VersionCommand::Publish {
                version_id: draft.version_id,
                change_summary: "release".to_string(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_create_draft_twice_replaces_snapshot() {
        let ids = IdAllocator::new();
        let (ledger, first) = apply(
            VersionLedger::new(),
            VersionCommand::CreateDraft {
                snapshot: snapshot(&ids, &["bo1"]),
            },
        )
        .unwrap();
        let (ledger, second) = apply(
            ledger,
            VersionCommand::CreateDraft {
                snapshot: snapshot(&ids, &["bo1", "bo2"]),
            },
        )
        .unwrap();
        assert_eq!(first.version_id, second.version_id);
        assert_eq!(ledger.len(), 1);
        assert_eq!(second.stats.map(|s| s.object_count), Some(2));
    }

    #[test]
    fn test_publish_moves_active_flag() {
        let ids = IdAllocator::new();
        let (ledger, v1) = draft_and_publish(VersionLedger::new(), snapshot(&ids, &["bo1"]));
        let (ledger, v2) = draft_and_publish(ledger, snapshot(&ids, &["bo1", "bo2"]));
        assert_eq!(v1.version, VersionNumber::INITIAL);
        assert_eq!(v2.version, VersionNumber::new(1, 1, 0));
        assert_eq!(ledger.get_active().map(|v| &v.version_id), Some(&v2.version_id));
        assert!(!ledger.get_by_id(&v1.version_id).unwrap().is_active);
    }

    #[test]
    fn test_publish_non_draft_is_invalid() {
        let ids = IdAllocator::new();
        let (ledger, v1) = draft_and_publish(VersionLedger::new(), snapshot(&ids, &["bo1"]));
        let err = apply(
            ledger,
            VersionCommand::Publish {
                version_id: v1.version_id,
                change_summary: String::new(),
            },
        )
        .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidTransition);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        for cmd in [
            VersionCommand::Publish {
                version_id: "nope".into(),
                change_summary: String::new(),
            },
            VersionCommand::Deprecate {
                version_id: "nope".into(),
            },
            VersionCommand::SetActive {
                version_id: "nope".into(),
            },
            VersionCommand::Rollback {
                version_id: "nope".into(),
            },
        ] {
            let err = apply(VersionLedger::new(), cmd).unwrap_err();
            assert_eq!(err.kind(), ExErrorKind::NotFound);
        }
    }

    #[test]
    fn test_deprecate_rules() {
        let ids = IdAllocator::new();
        let (ledger, v1) = draft_and_publish(VersionLedger::new(), snapshot(&ids, &["bo1"]));

        let err = apply(
            ledger.clone(),
            VersionCommand::Deprecate {
                version_id: v1.version_id.clone(),
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), format!("Cannot deprecate version {} while it is active", v1.version_id));

        let (ledger, v2) = draft_and_publish(ledger, snapshot(&ids, &["bo2"]));
        let (ledger, deprecated) = apply(
            ledger,
            VersionCommand::Deprecate {
                version_id: v1.version_id.clone(),
            },
        )
        .unwrap();
        assert_eq!(deprecated.status, VersionStatus::Deprecated);
        assert!(deprecated.deprecated_at.is_some());

        // Deprecated versions cannot be deprecated again or activated.
        let err = apply(
            ledger.clone(),
            VersionCommand::Deprecate {
                version_id: v1.version_id.clone(),
            },
        )
        .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidTransition);
        let err = apply(
            ledger.clone(),
            VersionCommand::SetActive {
                version_id: v1.version_id.clone(),
            },
        )
        .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidTransition);
        assert_eq!(ledger.get_active().map(|v| &v.version_id), Some(&v2.version_id));
    }

    #[test]
    fn test_deprecate_draft_is_invalid() {
        let ids = IdAllocator::new();
        let (ledger, draft) = apply(
            VersionLedger::new(),
            VersionCommand::CreateDraft {
                snapshot: snapshot(&ids, &["bo1"]),
            },
        )
        .unwrap();
        let err = apply(
            ledger,
            VersionCommand::Deprecate {
                version_id: draft.version_id,
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SemStoreError::InvalidTransition {
                state: TransitionState::Status(VersionStatus::Draft),
                ..
            }
        ));
    }

    #[test]
    fn test_rollback_replaces_draft_and_copies_snapshot() {
        let ids = IdAllocator::new();
        let (ledger, v1) = draft_and_publish(VersionLedger::new(), snapshot(&ids, &["bo1"]));
        let (ledger, _v2) = draft_and_publish(ledger, snapshot(&ids, &["bo1", "bo2"]));
        let (ledger, pending) = apply(
            ledger,
            VersionCommand::CreateDraft {
                snapshot: snapshot(&ids, &["bo9"]),
            },
        )
        .unwrap();

        let (ledger, rolled) = apply(
            ledger,
            VersionCommand::Rollback {
                version_id: v1.version_id.clone(),
            },
        )
        .unwrap();
        assert!(ledger.get_by_id(&pending.version_id).is_none());
        assert_eq!(rolled.version, VersionNumber::new(1, 2, 0));
        assert_eq!(rolled.change_summary.as_deref(), Some("Rollback from 1.0.0"));
        assert_eq!(*rolled.snapshot, *v1.snapshot);
        assert!(!Arc::ptr_eq(&rolled.snapshot, &v1.snapshot));
        assert!(compare(&ledger, &v1.version_id, &rolled.version_id)
            .unwrap()
            .is_empty());

        // Publishing with an empty summary keeps the rollback note.
        let (_, published) = apply(
            ledger,
            VersionCommand::Publish {
                version_id: rolled.version_id,
                change_summary: String::new(),
            },
        )
        .unwrap();
        assert_eq!(published.change_summary.as_deref(), Some("Rollback from 1.0.0"));
    }

    #[test]
    fn test_duplicate_object_ids_rejected() {
        let ids = IdAllocator::new();
        let err = apply(
            VersionLedger::new(),
            VersionCommand::CreateDraft {
                snapshot: snapshot(&ids, &["bo1", "bo1"]),
            },
        )
        .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvariantViolation);
    }

    #[test]
    fn test_compare_unknown_id() {
        let ids = IdAllocator::new();
        let (ledger, v1) = draft_and_publish(VersionLedger::new(), snapshot(&ids, &["bo1"]));
        let err = compare(&ledger, &v1.version_id, "missing").unwrap_err();
        assert_eq!(err, SemStoreError::not_found("missing"));
    }
}
