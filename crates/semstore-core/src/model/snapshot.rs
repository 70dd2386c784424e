use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use super::version::VersionStats;

/// Kind of business object in the semantic model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoType {
    Subject,
    #[default]
    #[serde(rename = "BO")]
    Bo,
    Resource,
}

impl BoType {
    /// Case-insensitive parse used by the snapshot builder's input adapter
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "subject" => Some(BoType::Subject),
            "bo" | "business_object" | "businessobject" => Some(BoType::Bo),
            "resource" => Some(BoType::Resource),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyLevel {
    Public,
    Internal,
    Sensitive,
    Secret,
}

impl PrivacyLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Some(PrivacyLevel::Public),
            "internal" => Some(PrivacyLevel::Internal),
            "sensitive" => Some(PrivacyLevel::Sensitive),
            "secret" => Some(PrivacyLevel::Secret),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    Has,
    BelongsTo,
    References,
    Extends,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinality {
    #[serde(rename = "1:1")]
    OneToOne,
    #[serde(rename = "1:n")]
    OneToMany,
    #[serde(rename = "n:1")]
    ManyToOne,
    #[serde(rename = "n:n")]
    ManyToMany,
}

/// One attribute of a business object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSnapshot {
    /// Unique within the owning object
    pub id: String,
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_level: Option<PrivacyLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_id: Option<String>,
}

/// A business object frozen into a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessObjectSnapshot {
    /// Unique within the snapshot
    pub id: String,
    pub label: String,
    pub normalized_name: String,
    #[serde(rename = "type")]
    pub bo_type: BoType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BusinessObjectSnapshot {
    pub fn field(&self, field_id: &str) -> Option<&FieldSnapshot> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    /// Compare everything except the volatile timestamps and the nested fields
    pub fn same_attributes(&self, other: &BusinessObjectSnapshot) -> bool {
        self.label == other.label
            && self.normalized_name == other.normalized_name
            && self.bo_type == other.bo_type
            && self.description == other.description
            && self.mapping == other.mapping
            && self.source == other.source
    }
}

/// Flattened field → term/tags lookup row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSemanticSnapshot {
    pub object_id: String,
    pub field_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationSnapshot {
    pub id: String,
    pub source_bo_id: String,
    pub target_bo_id: String,
    pub relation_type: RelationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<Cardinality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Immutable bundle of business objects, fields and relations
///
/// Once attached to a published or deprecated version it is only ever
/// reached through a shared `Arc`, so nothing can mutate it in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticSnapshot {
    #[serde(default)]
    pub business_objects: Vec<BusinessObjectSnapshot>,
    #[serde(default)]
    pub field_semantics: Vec<FieldSemanticSnapshot>,
    #[serde(default)]
    pub object_relations: Vec<RelationSnapshot>,
}

impl SemanticSnapshot {
    pub fn business_object(&self, id: &str) -> Option<&BusinessObjectSnapshot> {
        self.business_objects.iter().find(|bo| bo.id == id)
    }

    /// Derived object/field/relation counts
    pub fn stats(&self) -> VersionStats {
        VersionStats {
            object_count: self.business_objects.len(),
            field_count: self.business_objects.iter().map(|bo| bo.fields.len()).sum(),
            relation_count: self.object_relations.len(),
        }
    }

    /// Rebuild `field_semantics` from the objects' fields
    pub fn derive_field_semantics(objects: &[BusinessObjectSnapshot]) -> Vec<FieldSemanticSnapshot> {
        objects
            .iter()
            .flat_map(|bo| {
                bo.fields.iter().map(move |f| FieldSemanticSnapshot {
                    object_id: bo.id.clone(),
                    field_id: f.id.clone(),
                    term_id: f.term_id.clone(),
                    tags: f.tags.clone().unwrap_or_default(),
                })
            })
            .collect()
    }

    /// SHA-256 over the canonical JSON form with object timestamps removed
    ///
    /// Two snapshots with equal digests carry the same semantic content in
    /// the same order.
    pub fn semantic_digest(&self) -> String {
        let mut value = serde_json::to_value(self).unwrap_or(serde_json::Value::Null);
        if let Some(objects) = value
            .get_mut("businessObjects")
            .and_then(|v| v.as_array_mut())
        {
            for bo in objects.iter_mut().filter_map(|v| v.as_object_mut()) {
                bo.remove("createdAt");
                bo.remove("updatedAt");
            }
        }
        let canonical = serde_json::to_string(&value).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        hex::encode(hasher.finalize())
    }
}
