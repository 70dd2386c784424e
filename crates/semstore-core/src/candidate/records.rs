//! Working copy → Snapshot Builder input.

use serde_json::{json, Map, Value};
use std::collections::HashSet;

use crate::model::{CandidateItem, FieldSuggestion, WorkingCopy};

impl WorkingCopy {
    /// Business-object records for [`build_snapshot`](crate::snapshot::build_snapshot)
    ///
    /// One record per accepted object (primary first), each carrying the field
    /// suggestions that target it. Field ids are `<objectId>.<name>` so that
    /// rebuilding from the same decisions yields the same ids. Repeated
    /// object ids and repeated field names are dropped, first one wins.
    pub fn to_records(&self) -> Vec<Value> {
        let primary = Some(&self.primary_business_object).filter(|p| !p.is_placeholder());
        let mut seen = HashSet::new();

        primary
            .into_iter()
            .chain(self.business_objects.iter())
            .filter(|item| seen.insert(item.id.as_str()))
            .map(|item| object_record(item, &self.field_suggestions))
            .collect()
    }
}

fn object_record(item: &CandidateItem, suggestions: &[FieldSuggestion]) -> Value {
    let mut names = HashSet::new();
    let fields: Vec<Value> = suggestions
        .iter()
        .filter(|f| f.object_id == item.id && names.insert(f.name.as_str()))
        .map(|f| {
            let mut field = json!({
                "id": format!("{}.{}", item.id, f.name),
                "name": f.name,
                "label": f.label,
                "type": f.field_type,
                "required": f.required,
            });
            if let (Some(obj), Some(description)) = (field.as_object_mut(), &f.description) {
                obj.insert("description".to_string(), json!(description));
            }
            field
        })
        .collect();

    let mut record = Map::new();
    record.insert("id".to_string(), json!(item.id));
    record.insert("label".to_string(), json!(item.label));
    if let Some(normalized) = &item.normalized_name {
        record.insert("normalizedName".to_string(), json!(normalized));
    }
    record.insert("type".to_string(), json!(item.item_type));
    record.insert("fields".to_string(), Value::Array(fields));
    if let Some(mapping) = &item.mapping {
        record.insert("mapping".to_string(), json!(mapping));
    }
    record.insert("source".to_string(), json!("candidate"));
    Value::Object(record)
}
