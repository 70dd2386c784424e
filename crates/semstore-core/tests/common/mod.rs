use semstore_core::snapshot::{build_snapshot, IdAllocator};
use semstore_core::version::{apply, VersionCommand, VersionLedger};
use semstore_core::{SemanticSnapshot, SemanticVersion};
use serde_json::{json, Value};

/// Minimal business-object record with no fields and fixed timestamps
#[allow(dead_code)]
pub fn object(id: &str, label: &str) -> Value {
    json!({
        "id": id,
        "label": label,
        "fields": [],
        "createdAt": "2026-01-01T00:00:00Z",
        "updatedAt": "2026-01-01T00:00:00Z"
    })
}

/// Build a snapshot from records with a throwaway id allocator
#[allow(dead_code)]
pub fn snapshot(records: &[Value]) -> SemanticSnapshot {
    build_snapshot(records, &IdAllocator::new())
}

/// Create (or replace) the draft
#[allow(dead_code)]
pub fn create_draft(ledger: VersionLedger, records: &[Value]) -> (VersionLedger, SemanticVersion) {
    apply(
        ledger,
        VersionCommand::CreateDraft {
            snapshot: snapshot(records),
        },
    )
    .expect("create draft")
}

/// Create a draft from `records` and publish it
#[allow(dead_code)]
pub fn publish_records(
    ledger: VersionLedger,
    records: &[Value],
    summary: &str,
) -> (VersionLedger, SemanticVersion) {
    let (ledger, draft) = create_draft(ledger, records);
    apply(
        ledger,
        VersionCommand::Publish {
            version_id: draft.version_id,
            change_summary: summary.to_string(),
        },
    )
    .expect("publish draft")
}

/// Count drafts and active versions
#[allow(dead_code)]
pub fn draft_and_active_counts(ledger: &VersionLedger) -> (usize, usize) {
    let versions = ledger.list_versions();
    (
        versions.iter().filter(|v| v.is_draft()).count(),
        versions.iter().filter(|v| v.is_active).count(),
    )
}
