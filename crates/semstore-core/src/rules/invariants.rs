use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::model::{SemanticSnapshot, SemanticVersion, VersionNumber, VersionStatus};

/// One broken version invariant
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// More than one version is a draft
    MultipleDrafts { version_ids: Vec<String> },
    /// More than one version is flagged active
    MultipleActive { version_ids: Vec<String> },
    /// The active flag is set on a version that is not published
    ActiveNotPublished {
        version_id: String,
        status: VersionStatus,
    },
    /// Two versions share a version number
    DuplicateVersionNumber { version: VersionNumber },
    /// A later publication carries a number not above an earlier one
    PublishOrderRegression {
        earlier: VersionNumber,
        later: VersionNumber,
    },
    /// Two versions share a version id
    DuplicateVersionId { version_id: String },
    /// Two entities in one snapshot collection share an id
    DuplicateEntityId {
        version_id: String,
        collection: String,
        entity_id: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MultipleDrafts { version_ids } => {
                write!(f, "multiple drafts: {}", version_ids.join(", "))
            }
            Violation::MultipleActive { version_ids } => {
                write!(f, "multiple active versions: {}", version_ids.join(", "))
            }
            Violation::ActiveNotPublished { version_id, status } => {
                write!(f, "active version {} is {}", version_id, status)
            }
            Violation::DuplicateVersionNumber { version } => {
                write!(f, "version number {} used more than once", version)
            }
            Violation::PublishOrderRegression { earlier, later } => write!(
                f,
                "version {} published after {} but is not greater",
                later, earlier
            ),
            Violation::DuplicateVersionId { version_id } => {
                write!(f, "version id {} used more than once", version_id)
            }
            Violation::DuplicateEntityId {
                version_id,
                collection,
                entity_id,
            } => write!(
                f,
                "duplicate id {} in {} of version {}",
                entity_id, collection, version_id
            ),
        }
    }
}

/// Ids of every draft, when there is more than one
pub fn find_extra_drafts(versions: &[SemanticVersion]) -> Vec<String> {
    let drafts: Vec<String> = versions
        .iter()
        .filter(|v| v.is_draft())
        .map(|v| v.version_id.clone())
        .collect();
    if drafts.len() > 1 {
        drafts
    } else {
        Vec::new()
    }
}

/// Ids of every active version, when there is more than one
pub fn find_extra_active(versions: &[SemanticVersion]) -> Vec<String> {
    let active: Vec<String> = versions
        .iter()
        .filter(|v| v.is_active)
        .map(|v| v.version_id.clone())
        .collect();
    if active.len() > 1 {
        active
    } else {
        Vec::new()
    }
}

/// Active versions whose status is not `published`
pub fn find_active_not_published(versions: &[SemanticVersion]) -> Vec<(String, VersionStatus)> {
    versions
        .iter()
        .filter(|v| v.is_active && v.status != VersionStatus::Published)
        .map(|v| (v.version_id.clone(), v.status))
        .collect()
}

pub fn find_duplicate_version_numbers(versions: &[SemanticVersion]) -> Vec<VersionNumber> {
    let mut counts: BTreeMap<VersionNumber, usize> = BTreeMap::new();
    for v in versions {
        *counts.entry(v.version).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(number, _)| number)
        .collect()
}

/// Adjacent publications, in ledger order, whose numbers do not strictly
/// increase
///
/// The draft is always the last version in the list and is published in
/// place, so list order is publication order. `publishedAt` is not consulted:
/// it comes from the wall clock and may step backwards.
///
/// Returns `(earlier, later)` pairs.
pub fn find_publish_order_regressions(
    versions: &[SemanticVersion],
) -> Vec<(VersionNumber, VersionNumber)> {
    let published: Vec<&SemanticVersion> =
        versions.iter().filter(|v| v.was_published()).collect();

    published
        .windows(2)
        .filter(|pair| pair[1].version <= pair[0].version)
        .map(|pair| (pair[0].version, pair[1].version))
        .collect()
}

pub fn find_duplicate_version_ids(versions: &[SemanticVersion]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for v in versions {
        if !seen.insert(v.version_id.as_str()) && !duplicates.contains(&v.version_id) {
            duplicates.push(v.version_id.clone());
        }
    }
    duplicates
}

fn repeated_ids<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    ids.filter(|id| !seen.insert(*id)).collect()
}

/// Duplicate ids inside one snapshot
///
/// Returns `(collection, entity_id)` pairs; field collections are named
/// `fields of <object id>`.
pub fn find_duplicate_entity_ids(snapshot: &SemanticSnapshot) -> Vec<(String, String)> {
    let mut duplicates = Vec::new();

    for id in repeated_ids(snapshot.business_objects.iter().map(|bo| bo.id.as_str())) {
        duplicates.push(("businessObjects".to_string(), id.to_string()));
    }
    for bo in &snapshot.business_objects {
        for id in repeated_ids(bo.fields.iter().map(|f| f.id.as_str())) {
            duplicates.push((format!("fields of {}", bo.id), id.to_string()));
        }
    }
    for id in repeated_ids(snapshot.object_relations.iter().map(|r| r.id.as_str())) {
        duplicates.push(("objectRelations".to_string(), id.to_string()));
    }

    duplicates
}

/// Every invariant breach in a version list
pub fn find_violations(versions: &[SemanticVersion]) -> Vec<Violation> {
    let mut violations = Vec::new();

    let drafts = find_extra_drafts(versions);
    if !drafts.is_empty() {
        violations.push(Violation::MultipleDrafts {
            version_ids: drafts,
        });
    }

    let active = find_extra_active(versions);
    if !active.is_empty() {
        violations.push(Violation::MultipleActive {
            version_ids: active,
        });
    }

    for (version_id, status) in find_active_not_published(versions) {
        violations.push(Violation::ActiveNotPublished { version_id, status });
    }

    for version in find_duplicate_version_numbers(versions) {
        violations.push(Violation::DuplicateVersionNumber { version });
    }

    for (earlier, later) in find_publish_order_regressions(versions) {
        violations.push(Violation::PublishOrderRegression { earlier, later });
    }

    for version_id in find_duplicate_version_ids(versions) {
        violations.push(Violation::DuplicateVersionId { version_id });
    }

    for v in versions {
        for (collection, entity_id) in find_duplicate_entity_ids(&v.snapshot) {
            violations.push(Violation::DuplicateEntityId {
                version_id: v.version_id.clone(),
                collection,
                entity_id,
            });
        }
    }

    violations
}
