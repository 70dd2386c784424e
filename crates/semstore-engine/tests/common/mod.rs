use semstore_core::SemanticVersion;
use semstore_engine::VersionStore;
use serde_json::{json, Value};

/// Business-object record with the given field names and fixed timestamps
#[allow(dead_code)]
pub fn object(id: &str, label: &str, fields: &[&str]) -> Value {
    let fields: Vec<Value> = fields
        .iter()
        .map(|name| json!({"id": format!("{}.{}", id, name), "name": name, "dataType": "string"}))
        .collect();
    json!({
        "id": id,
        "label": label,
        "fields": fields,
        "createdAt": "2026-01-01T00:00:00Z",
        "updatedAt": "2026-01-01T00:00:00Z"
    })
}

/// Create a draft from `records` and publish it
#[allow(dead_code)]
pub fn publish_records(store: &VersionStore, records: &[Value], summary: &str) -> SemanticVersion {
    let draft = store.create_draft(records).expect("create draft");
    store
        .publish(&draft.version_id, summary)
        .expect("publish draft")
}

/// Count drafts and active versions currently in the store
#[allow(dead_code)]
pub fn draft_and_active_counts(store: &VersionStore) -> (usize, usize) {
    let versions = store.list_versions();
    (
        versions.iter().filter(|v| v.is_draft()).count(),
        versions.iter().filter(|v| v.is_active).count(),
    )
}
