//! Boundary adapter for loosely-typed business-object records.
//!
//! Each attribute is read from a fixed list of keys; the first key holding a
//! usable value wins. Unusable values (wrong JSON type, unparseable enum)
//! fall through to the next alias, then to the default.
//!
//! | Attribute | Keys, in precedence order | Default |
//! |---|---|---|
//! | object id | `id`, `boId` | generated `bo_*` |
//! | label | `label`, `name` | `""` |
//! | normalizedName | `normalizedName`, `normalized_name`, `name` | `""` |
//! | type | `type`, `boType` | `BO` |
//! | createdAt / updatedAt | `createdAt`/`created_at`, `updatedAt`/`updated_at` | build time |
//! | field id | `id`, `fieldId` | generated `field_*` |
//! | field name | `name`, `fieldName`, `label` | `""` |
//! | field label | `label`, `name` | `""` |
//! | field type | `type`, `dataType` | `"string"` |
//! | required | `required`, `isRequired` | absent |
//! | privacyLevel | `privacyLevel`, `privacy_level` | absent |
//! | termId | `termId`, `term_id` | absent |

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::model::{BoType, PrivacyLevel};

fn first_str<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| obj.get(*k).and_then(Value::as_str))
}

fn first_bool(obj: &Map<String, Value>, keys: &[&str]) -> Option<bool> {
    keys.iter().find_map(|k| obj.get(*k).and_then(Value::as_bool))
}

fn first_timestamp(obj: &Map<String, Value>, keys: &[&str]) -> Option<DateTime<Utc>> {
    keys.iter().find_map(|k| {
        obj.get(*k)
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    })
}

/// Field record after alias resolution
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawField {
    pub id: Option<String>,
    pub name: String,
    pub label: String,
    pub field_type: String,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub privacy_level: Option<PrivacyLevel>,
    pub tags: Option<Vec<String>>,
    pub term_id: Option<String>,
}

impl RawField {
    pub fn from_value(value: &Value) -> Self {
        let empty = Map::new();
        let obj = value.as_object().unwrap_or(&empty);
        Self {
            id: first_str(obj, &["id", "fieldId"])
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            name: first_str(obj, &["name", "fieldName", "label"])
                .unwrap_or_default()
                .to_string(),
            label: first_str(obj, &["label", "name"])
                .unwrap_or_default()
                .to_string(),
            field_type: first_str(obj, &["type", "dataType"])
                .unwrap_or("string")
                .to_string(),
            description: first_str(obj, &["description"]).map(str::to_string),
            required: first_bool(obj, &["required", "isRequired"]),
            privacy_level: ["privacyLevel", "privacy_level"].iter().find_map(|k| {
                obj.get(*k)
                    .and_then(Value::as_str)
                    .and_then(PrivacyLevel::parse)
            }),
            tags: obj.get("tags").and_then(Value::as_array).map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            }),
            term_id: first_str(obj, &["termId", "term_id"]).map(str::to_string),
        }
    }
}

/// Business-object record after alias resolution
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawBusinessObject {
    pub id: Option<String>,
    pub label: String,
    pub normalized_name: String,
    pub bo_type: BoType,
    pub description: Option<String>,
    pub fields: Vec<RawField>,
    pub mapping: Option<BTreeMap<String, Value>>,
    pub source: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl RawBusinessObject {
    pub fn from_value(value: &Value) -> Self {
        let empty = Map::new();
        let obj = value.as_object().unwrap_or(&empty);
        Self {
            id: first_str(obj, &["id", "boId"])
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            label: first_str(obj, &["label", "name"])
                .unwrap_or_default()
                .to_string(),
            normalized_name: first_str(obj, &["normalizedName", "normalized_name", "name"])
                .unwrap_or_default()
                .to_string(),
            bo_type: ["type", "boType"]
                .iter()
                .find_map(|k| obj.get(*k).and_then(Value::as_str).and_then(BoType::parse))
                .unwrap_or_default(),
            description: first_str(obj, &["description"]).map(str::to_string),
            fields: obj
                .get("fields")
                .and_then(Value::as_array)
                .map(|fields| fields.iter().map(RawField::from_value).collect())
                .unwrap_or_default(),
            mapping: obj
                .get("mapping")
                .and_then(Value::as_object)
                .map(|m| m.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
            source: first_str(obj, &["source"]).map(str::to_string),
            created_at: first_timestamp(obj, &["createdAt", "created_at"]),
            updated_at: first_timestamp(obj, &["updatedAt", "updated_at"]),
        }
    }
}
