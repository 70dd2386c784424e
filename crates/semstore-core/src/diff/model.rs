//! Diff output types.
//!
//! Serialized with camelCase keys; this is the shape diff views consume.

use serde::{Deserialize, Serialize};

use crate::model::{BusinessObjectSnapshot, FieldSnapshot, RelationSnapshot};

/// The structured delta between two snapshots ("from" → "to").
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDiff {
    /// Entities present in "to" but not in "from"
    pub added: EntityChanges,
    /// Entities present in "from" but not in "to"
    pub removed: EntityChanges,
    /// Business objects present on both sides whose content differs
    pub modified: ModifiedEntities,
    pub summary: DiffSummary,
}

impl VersionDiff {
    pub fn is_empty(&self) -> bool {
        self.summary.total_changes == 0
    }
}

/// Added or removed top-level entities.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityChanges {
    pub business_objects: Vec<BusinessObjectSnapshot>,
    pub relations: Vec<RelationSnapshot>,
}

impl EntityChanges {
    pub fn len(&self) -> usize {
        self.business_objects.len() + self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedEntities {
    pub business_objects: Vec<ObjectModification>,
}

/// A business object that exists on both sides but changed.
///
/// `field_changes` is populated even when only the object's own attributes
/// changed (it is then empty).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectModification {
    pub id: String,
    pub before: BusinessObjectSnapshot,
    pub after: BusinessObjectSnapshot,
    pub field_changes: FieldChanges,
}

/// Field-level delta inside one modified business object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChanges {
    pub added: Vec<FieldSnapshot>,
    pub removed: Vec<FieldSnapshot>,
    pub modified: Vec<FieldModification>,
}

impl FieldChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldModification {
    pub before: FieldSnapshot,
    pub after: FieldSnapshot,
}

/// Change counts.
///
/// `additions` and `removals` count top-level entities (business objects and
/// relations); field-level changes surface only through `modifications`.
/// Every removal is breaking for downstream readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffSummary {
    pub total_changes: usize,
    pub breaking_changes: usize,
    pub additions: usize,
    pub modifications: usize,
    pub removals: usize,
}

impl DiffSummary {
    pub fn from_counts(additions: usize, modifications: usize, removals: usize) -> Self {
        Self {
            total_changes: additions + modifications + removals,
            breaking_changes: removals,
            additions,
            modifications,
            removals,
        }
    }
}
