use std::collections::HashMap;

use crate::errors::{Result, SemStoreError};
use crate::model::{SemanticVersion, VersionNumber};
use crate::rules::validation;

/// Ordered collection of every version ever created
///
/// The `status`/`isActive` fields on the versions are the source of truth.
/// The id, active and draft indexes are derived from them and rebuilt after
/// every write, so lookups stay O(1) without a second record to keep in sync.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionLedger {
    versions: Vec<SemanticVersion>,
    by_id: HashMap<String, usize>,
    active: Option<usize>,
    draft: Option<usize>,
}

impl VersionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from a loaded version list
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if the list breaks any version invariant.
    pub fn from_versions(versions: Vec<SemanticVersion>) -> Result<Self> {
        validation::validate_versions(&versions)?;
        let mut ledger = Self {
            versions,
            ..Self::default()
        };
        ledger.reindex();
        Ok(ledger)
    }

    pub(crate) fn versions_mut(&mut self) -> &mut Vec<SemanticVersion> {
        &mut self.versions
    }

    /// Rebuild the secondary indexes from the version flags
    pub(crate) fn reindex(&mut self) {
        self.by_id = self
            .versions
            .iter()
            .enumerate()
            .map(|(i, v)| (v.version_id.clone(), i))
            .collect();
        self.active = self.versions.iter().position(|v| v.is_active);
        self.draft = self.versions.iter().position(|v| v.is_draft());
    }

    pub(crate) fn index_of(&self, version_id: &str) -> Result<usize> {
        self.by_id
            .get(version_id)
            .copied()
            .ok_or_else(|| SemStoreError::not_found(version_id))
    }

    pub fn into_versions(self) -> Vec<SemanticVersion> {
        self.versions
    }

    /// All versions in creation order, no filtering
    pub fn list_versions(&self) -> &[SemanticVersion] {
        &self.versions
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn get_active(&self) -> Option<&SemanticVersion> {
        self.active.and_then(|i| self.versions.get(i))
    }

    pub fn get_draft(&self) -> Option<&SemanticVersion> {
        self.draft.and_then(|i| self.versions.get(i))
    }

    pub fn get_by_id(&self, version_id: &str) -> Option<&SemanticVersion> {
        self.by_id.get(version_id).and_then(|i| self.versions.get(*i))
    }

    /// Look up a version by its `major.minor.patch` number
    ///
    /// Published and deprecated versions win over a draft carrying the same
    /// number.
    pub fn find_by_version(&self, number: VersionNumber) -> Option<&SemanticVersion> {
        self.versions
            .iter()
            .filter(|v| v.version == number)
            .max_by_key(|v| v.was_published())
    }

    /// Non-draft versions, newest first
    ///
    /// Sorted by `createdAt` descending; versions created in the same instant
    /// are ordered by version number, highest first.
    pub fn get_history(&self) -> Vec<&SemanticVersion> {
        let mut history: Vec<&SemanticVersion> =
            self.versions.iter().filter(|v| v.was_published()).collect();
        history.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.version.cmp(&a.version))
        });
        history
    }
}
