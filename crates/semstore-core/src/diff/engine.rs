//! Snapshot diff computation.
//!
//! The entry point is [`compute_diff`]. The same keyed delta runs at each
//! nesting level: business objects, fields inside a matched object, then
//! relations (added/removed only).

use std::collections::BTreeMap;

use crate::diff::model::{
    DiffSummary, EntityChanges, FieldChanges, FieldModification, ModifiedEntities,
    ObjectModification, VersionDiff,
};
use crate::model::{BusinessObjectSnapshot, FieldSnapshot, RelationSnapshot, SemanticSnapshot};

/// Anything matched by id across the two sides of a diff
trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for BusinessObjectSnapshot {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for FieldSnapshot {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for RelationSnapshot {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Result of one keyed comparison, every list ordered by id.
struct KeyedDelta<'a, T> {
    added: Vec<&'a T>,
    removed: Vec<&'a T>,
    common: Vec<(&'a T, &'a T)>,
}

fn keyed_delta<'a, T: Keyed>(from: &'a [T], to: &'a [T]) -> KeyedDelta<'a, T> {
    let from_by_id: BTreeMap<&str, &T> = from.iter().map(|e| (e.key(), e)).collect();
    let to_by_id: BTreeMap<&str, &T> = to.iter().map(|e| (e.key(), e)).collect();

    let added = to_by_id
        .iter()
        .filter(|(id, _)| !from_by_id.contains_key(*id))
        .map(|(_, e)| *e)
        .collect();
    let removed = from_by_id
        .iter()
        .filter(|(id, _)| !to_by_id.contains_key(*id))
        .map(|(_, e)| *e)
        .collect();
    let common = from_by_id
        .iter()
        .filter_map(|(id, before)| to_by_id.get(id).map(|after| (*before, *after)))
        .collect();

    KeyedDelta {
        added,
        removed,
        common,
    }
}

fn diff_fields(before: &BusinessObjectSnapshot, after: &BusinessObjectSnapshot) -> FieldChanges {
    let delta = keyed_delta(&before.fields, &after.fields);
    FieldChanges {
        added: delta.added.into_iter().cloned().collect(),
        removed: delta.removed.into_iter().cloned().collect(),
        modified: delta
            .common
            .into_iter()
            .filter(|(b, a)| b != a)
            .map(|(b, a)| FieldModification {
                before: b.clone(),
                after: a.clone(),
            })
            .collect(),
    }
}

fn diff_object(
    before: &BusinessObjectSnapshot,
    after: &BusinessObjectSnapshot,
) -> Option<ObjectModification> {
    let field_changes = diff_fields(before, after);
    if before.same_attributes(after) && field_changes.is_empty() {
        return None;
    }
    Some(ObjectModification {
        id: after.id.clone(),
        before: before.clone(),
        after: after.clone(),
        field_changes,
    })
}

/// Compute the structural delta from `from` to `to`.
///
/// Objects are matched by id and compared with timestamps ignored; a
/// modified object carries its nested field delta. Relations are matched by
/// id only. All output lists are sorted by id.
pub fn compute_diff(from: &SemanticSnapshot, to: &SemanticSnapshot) -> VersionDiff {
    if from.semantic_digest() == to.semantic_digest() {
        tracing::debug!("diff fast path: semantic digests match");
        return VersionDiff::default();
    }

    let objects = keyed_delta(&from.business_objects, &to.business_objects);
    let relations = keyed_delta(&from.object_relations, &to.object_relations);

    let modified: Vec<ObjectModification> = objects
        .common
        .iter()
        .filter_map(|(before, after)| diff_object(before, after))
        .collect();

    let added = EntityChanges {
        business_objects: objects.added.into_iter().cloned().collect(),
        relations: relations.added.into_iter().cloned().collect(),
    };
    let removed = EntityChanges {
        business_objects: objects.removed.into_iter().cloned().collect(),
        relations: relations.removed.into_iter().cloned().collect(),
    };

    let summary = DiffSummary::from_counts(added.len(), modified.len(), removed.len());
    tracing::debug!(
        total_changes = summary.total_changes,
        breaking_changes = summary.breaking_changes,
        "diff computed"
    );

    VersionDiff {
        added,
        removed,
        modified: ModifiedEntities {
            business_objects: modified,
        },
        summary,
    }
}
