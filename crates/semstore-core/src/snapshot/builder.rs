use chrono::{DateTime, Utc};
use serde_json::Value;

use super::ids::IdAllocator;
use super::record::{RawBusinessObject, RawField};
use crate::model::{BusinessObjectSnapshot, FieldSnapshot, SemanticSnapshot};

/// Build a canonical snapshot from loosely-typed business-object records
///
/// Never fails: missing attributes degrade to defaults and missing ids are
/// drawn from `ids`. Ids already present on a record are kept as-is, and the
/// output preserves input order. `objectRelations` starts empty since the
/// records carry no relation data.
pub fn build_snapshot(records: &[Value], ids: &IdAllocator) -> SemanticSnapshot {
    let built_at = Utc::now();
    let business_objects: Vec<BusinessObjectSnapshot> = records
        .iter()
        .map(|record| normalize_object(RawBusinessObject::from_value(record), ids, built_at))
        .collect();

    let field_semantics = SemanticSnapshot::derive_field_semantics(&business_objects);

    tracing::debug!(
        object_count = business_objects.len(),
        field_semantics = field_semantics.len(),
        "snapshot built"
    );

    SemanticSnapshot {
        business_objects,
        field_semantics,
        object_relations: Vec::new(),
    }
}

fn normalize_object(
    raw: RawBusinessObject,
    ids: &IdAllocator,
    built_at: DateTime<Utc>,
) -> BusinessObjectSnapshot {
    let id = raw.id.unwrap_or_else(|| ids.next_id("bo"));
    let fields = raw
        .fields
        .into_iter()
        .map(|field| normalize_field(field, ids))
        .collect();

    BusinessObjectSnapshot {
        id,
        label: raw.label,
        normalized_name: raw.normalized_name,
        bo_type: raw.bo_type,
        description: raw.description,
        fields,
        mapping: raw.mapping,
        source: raw.source,
        created_at: raw.created_at.unwrap_or(built_at),
        updated_at: raw.updated_at.unwrap_or(built_at),
    }
}

fn normalize_field(raw: RawField, ids: &IdAllocator) -> FieldSnapshot {
    FieldSnapshot {
        id: raw.id.unwrap_or_else(|| ids.next_id("field")),
        name: raw.name,
        label: raw.label,
        field_type: raw.field_type,
        description: raw.description,
        required: raw.required,
        privacy_level: raw.privacy_level,
        tags: raw.tags,
        term_id: raw.term_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoType;
    use serde_json::json;

    #[test]
    fn test_build_preserves_order_and_ids() {
        let ids = IdAllocator::new();
        let records = vec![
            json!({"id": "bo2", "label": "Order"}),
            json!({"id": "bo1", "label": "Customer"}),
        ];
        let snapshot = build_snapshot(&records, &ids);
        let order: Vec<&str> = snapshot
            .business_objects
            .iter()
            .map(|bo| bo.id.as_str())
            .collect();
        assert_eq!(order, vec!["bo2", "bo1"]);
        assert!(snapshot.object_relations.is_empty());
        assert_eq!(ids.issued(), 0);
    }

    #[test]
    fn test_missing_field_ids_are_generated() {
        let ids = IdAllocator::new();
        let records = vec![json!({
            "id": "bo1",
            "fields": [{"name": "email"}, {"name": "phone"}, {"id": "f-keep", "name": "age"}]
        })];
        let snapshot = build_snapshot(&records, &ids);
        let fields = &snapshot.business_objects[0].fields;
        assert!(fields[0].id.starts_with("field_"));
        assert!(fields[1].id.starts_with("field_"));
        assert_ne!(fields[0].id, fields[1].id);
        assert_eq!(fields[2].id, "f-keep");
        assert_eq!(fields[0].field_type, "string");
    }

    #[test]
    fn test_field_semantics_flattened() {
        let ids = IdAllocator::new();
        let records = vec![json!({
            "id": "bo1",
            "fields": [
                {"id": "f1", "termId": "t1", "tags": ["pii"]},
                {"id": "f2"}
            ]
        })];
        let snapshot = build_snapshot(&records, &ids);
        assert_eq!(snapshot.field_semantics.len(), 2);
        assert_eq!(snapshot.field_semantics[0].object_id, "bo1");
        assert_eq!(snapshot.field_semantics[0].term_id.as_deref(), Some("t1"));
        assert_eq!(snapshot.field_semantics[0].tags, vec!["pii".to_string()]);
        assert!(snapshot.field_semantics[1].tags.is_empty());
    }

    #[test]
    fn test_garbage_input_never_fails() {
        let ids = IdAllocator::new();
        let records = vec![json!(null), json!(42), json!({"type": 7})];
        let snapshot = build_snapshot(&records, &ids);
        assert_eq!(snapshot.business_objects.len(), 3);
        assert!(snapshot
            .business_objects
            .iter()
            .all(|bo| bo.id.starts_with("bo_") && bo.bo_type == BoType::Bo));
    }

    #[test]
    fn test_supplied_timestamps_are_kept() {
        let ids = IdAllocator::new();
        let records = vec![json!({
            "id": "bo1",
            "created_at": "2025-03-01T10:00:00Z",
            "updatedAt": "2025-03-02T10:00:00+02:00"
        })];
        let snapshot = build_snapshot(&records, &ids);
        let bo = &snapshot.business_objects[0];
        assert_eq!(bo.created_at.to_rfc3339(), "2025-03-01T10:00:00+00:00");
        assert_eq!(bo.updated_at.to_rfc3339(), "2025-03-02T08:00:00+00:00");
    }
}
