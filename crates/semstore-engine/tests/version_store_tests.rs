// Lifecycle scenarios driven through the VersionStore service

mod common;

use common::{draft_and_active_counts, object, publish_records};
use semstore_core::errors::{ExErrorKind, SemStoreError};
use semstore_core::{VersionNumber, VersionStatus};
use semstore_engine::VersionStore;

#[test]
fn test_first_publish_becomes_active_1_0_0() {
    let store = VersionStore::in_memory();
    let draft = store
        .create_draft(&[object("bo_customer", "Customer", &["email"])])
        .unwrap();
    assert_eq!(draft.status, VersionStatus::Draft);
    assert_eq!(store.get_draft().unwrap().version_id, draft.version_id);

    let published = store.publish(&draft.version_id, "initial model").unwrap();

    assert_eq!(published.version.to_string(), "1.0.0");
    assert!(published.is_active);
    assert_eq!(published.change_summary.as_deref(), Some("initial model"));
    assert!(published.published_at.is_some());
    assert!(store.get_draft().is_none());
    assert_eq!(store.get_active().unwrap().version_id, published.version_id);
}

#[test]
fn test_second_publish_moves_active_flag() {
    let store = VersionStore::in_memory();
    let v1 = publish_records(&store, &[object("bo_a", "A", &[])], "v1");
    let v2 = publish_records(&store, &[object("bo_a", "A", &["x"])], "v2");

    assert_eq!(v2.version.to_string(), "1.1.0");
    assert!(!store.get_by_id(&v1.version_id).unwrap().is_active);
    assert!(store.get_by_id(&v2.version_id).unwrap().is_active);
    assert_eq!(draft_and_active_counts(&store), (0, 1));
}

#[test]
fn test_create_draft_twice_replaces_snapshot_in_place() {
    let store = VersionStore::in_memory();
    let first = store.create_draft(&[object("bo_a", "A", &[])]).unwrap();
    let second = store
        .create_draft(&[object("bo_a", "A", &[]), object("bo_b", "B", &[])])
        .unwrap();

    assert_eq!(first.version_id, second.version_id);
    assert_eq!(first.version, second.version);
    assert_eq!(second.stats.unwrap().object_count, 2);
    assert_eq!(store.list_versions().len(), 1);
}

#[test]
fn test_deprecate_active_is_rejected() {
    let store = VersionStore::in_memory();
    let v1 = publish_records(&store, &[object("bo_a", "A", &[])], "v1");

    let err = store.deprecate(&v1.version_id).unwrap_err();

    assert!(matches!(err, SemStoreError::InvalidTransition { .. }));
    assert_eq!(err.kind(), ExErrorKind::InvalidTransition);
    assert_eq!(store.get_by_id(&v1.version_id).unwrap().status, VersionStatus::Published);
}

#[test]
fn test_deprecate_inactive_published_version() {
    let store = VersionStore::in_memory();
    let v1 = publish_records(&store, &[object("bo_a", "A", &[])], "v1");
    publish_records(&store, &[object("bo_b", "B", &[])], "v2");

    let deprecated = store.deprecate(&v1.version_id).unwrap();

    assert_eq!(deprecated.status, VersionStatus::Deprecated);
    assert!(deprecated.deprecated_at.is_some());
    // Deprecated numbers still count towards the next version.
    let v3 = publish_records(&store, &[object("bo_c", "C", &[])], "v3");
    assert_eq!(v3.version.to_string(), "1.2.0");
}

#[test]
fn test_set_active_switches_back_to_older_version() {
    let store = VersionStore::in_memory();
    let v1 = publish_records(&store, &[object("bo_a", "A", &[])], "v1");
    publish_records(&store, &[object("bo_b", "B", &[])], "v2");

    store.set_active(&v1.version_id).unwrap();

    assert_eq!(store.get_active().unwrap().version_id, v1.version_id);
    assert_eq!(draft_and_active_counts(&store), (0, 1));
}

#[test]
fn test_set_active_on_draft_is_rejected() {
    let store = VersionStore::in_memory();
    let draft = store.create_draft(&[]).unwrap();

    let err = store.set_active(&draft.version_id).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidTransition);
}

#[test]
fn test_unknown_ids_are_not_found() {
    let store = VersionStore::in_memory();
    for result in [
        store.publish("nope", "x"),
        store.deprecate("nope"),
        store.set_active("nope"),
        store.rollback("nope"),
    ] {
        assert_eq!(result.unwrap_err().kind(), ExErrorKind::NotFound);
    }
    assert_eq!(store.compare("nope", "nada").unwrap_err().kind(), ExErrorKind::NotFound);
}

#[test]
fn test_rollback_drafts_copy_of_old_snapshot() {
    let store = VersionStore::in_memory();
    let v1 = publish_records(&store, &[object("bo_a", "A", &["x"])], "v1");
    publish_records(&store, &[object("bo_b", "B", &[])], "v2");
    store.create_draft(&[object("bo_z", "Z", &[])]).unwrap();

    let rollback = store.rollback(&v1.version_id).unwrap();

    assert_eq!(rollback.status, VersionStatus::Draft);
    assert_eq!(rollback.version.to_string(), "1.2.0");
    assert_eq!(rollback.change_summary.as_deref(), Some("Rollback from 1.0.0"));
    assert_eq!(*rollback.snapshot, *v1.snapshot);
    assert_eq!(draft_and_active_counts(&store), (1, 1));

    // Publishing without a summary keeps the rollback note.
    let published = store.publish(&rollback.version_id, "").unwrap();
    assert_eq!(published.change_summary.as_deref(), Some("Rollback from 1.0.0"));
    assert!(store.compare(&v1.version_id, &published.version_id).unwrap().is_empty());
}

#[test]
fn test_compare_reports_added_removed_modified() {
    let store = VersionStore::in_memory();
    let v1 = publish_records(
        &store,
        &[object("bo_a", "A", &["x"]), object("bo_b", "B", &[])],
        "v1",
    );
    let v2 = publish_records(
        &store,
        &[object("bo_a", "A", &["x", "y"]), object("bo_c", "C", &[])],
        "v2",
    );

    let diff = store.compare(&v1.version_id, &v2.version_id).unwrap();

    assert_eq!(diff.added.business_objects.len(), 1);
    assert_eq!(diff.added.business_objects[0].id, "bo_c");
    assert_eq!(diff.removed.business_objects[0].id, "bo_b");
    assert_eq!(diff.modified.business_objects.len(), 1);
    assert_eq!(diff.modified.business_objects[0].field_changes.added.len(), 1);
    assert_eq!(diff.summary.breaking_changes, 1);
    assert_eq!(diff.summary.total_changes, 3);
}

#[test]
fn test_history_and_find_by_version() {
    let store = VersionStore::in_memory();
    let v1 = publish_records(&store, &[object("bo_a", "A", &[])], "v1");
    let v2 = publish_records(&store, &[object("bo_b", "B", &[])], "v2");
    store.create_draft(&[]).unwrap();

    let history: Vec<String> = store
        .get_history()
        .into_iter()
        .map(|v| v.version_id)
        .collect();
    assert_eq!(history, vec![v2.version_id.clone(), v1.version_id.clone()]);

    let found = store.find_by_version(VersionNumber::new(1, 0, 0)).unwrap();
    assert_eq!(found.version_id, v1.version_id);
    assert!(store.find_by_version(VersionNumber::new(9, 0, 0)).is_none());
}

#[test]
fn test_duplicate_object_ids_rejected_without_state_change() {
    let store = VersionStore::in_memory();
    publish_records(&store, &[object("bo_a", "A", &[])], "v1");
    let before = store.list_versions();

    let err = store
        .create_draft(&[object("bo_dup", "One", &[]), object("bo_dup", "Two", &[])])
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvariantViolation);
    assert_eq!(store.list_versions(), before);
}
