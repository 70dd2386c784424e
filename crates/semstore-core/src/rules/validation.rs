use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::{Result, SemStoreError};
use crate::model::{SemanticVersion, WorkingCopy};

use super::invariants;

/// Reject a version list that breaks any version invariant
///
/// Runs after every lifecycle command and when a persisted record is loaded.
///
/// # Errors
///
/// `InvariantViolation` listing every breach found.
pub fn validate_versions(versions: &[SemanticVersion]) -> Result<()> {
    let violations = invariants::find_violations(versions);
    if violations.is_empty() {
        return Ok(());
    }
    let details: Vec<String> = violations.iter().map(ToString::to_string).collect();
    Err(SemStoreError::InvariantViolation {
        details: details.join("; "),
    })
}

/// Minimum score for a working copy to count as publishable
pub const PASS_THRESHOLD: u8 = 60;

const WEIGHT_PRIMARY: u8 = 40;
const WEIGHT_ROLES: u8 = 20;
const WEIGHT_ACTIONS: u8 = 15;
const WEIGHT_FIELDS: u8 = 15;
const WEIGHT_STATES: u8 = 10;

/// Outcome of the completeness checks on a working copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// 0..=100
    pub score: u8,
    pub passed: bool,
    pub issues: Vec<String>,
}

/// Score a working copy for minimum completeness
///
/// | Check | Weight |
/// |---|---|
/// | primary business object accepted | 40 |
/// | at least one role | 20 |
/// | at least one action | 15 |
/// | field suggestions for an accepted object | 15 |
/// | state machine with an initial state | 10 |
///
/// Advisory only; the version lifecycle does not consult it.
pub fn validate_working_copy(copy: &WorkingCopy) -> ValidationReport {
    let mut score = 0u8;
    let mut issues = Vec::new();

    let primary_present = !copy.primary_business_object.is_placeholder();
    if primary_present {
        score += WEIGHT_PRIMARY;
    } else {
        issues.push("no primary business object accepted".to_string());
    }

    if copy.roles.is_empty() {
        issues.push("no roles accepted".to_string());
    } else {
        score += WEIGHT_ROLES;
    }

    if copy.actions.is_empty() {
        issues.push("no actions accepted".to_string());
    } else {
        score += WEIGHT_ACTIONS;
    }

    let mut accepted_objects: HashSet<&str> =
        copy.business_objects.iter().map(|bo| bo.id.as_str()).collect();
    if primary_present {
        accepted_objects.insert(copy.primary_business_object.id.as_str());
    }
    if copy
        .field_suggestions
        .iter()
        .any(|f| accepted_objects.contains(f.object_id.as_str()))
    {
        score += WEIGHT_FIELDS;
    } else {
        issues.push("no fields suggested for accepted business objects".to_string());
    }

    if copy.state_machine.states.iter().any(|s| s.is_initial) {
        score += WEIGHT_STATES;
    } else {
        issues.push("state machine has no initial state".to_string());
    }

    ValidationReport {
        score,
        passed: score >= PASS_THRESHOLD,
        issues,
    }
}

/// Fail when a working copy scores below [`PASS_THRESHOLD`]
///
/// # Errors
///
/// `ValidationFailed` carrying the score and issues.
pub fn ensure_publishable(copy: &WorkingCopy) -> Result<ValidationReport> {
    let report = validate_working_copy(copy);
    if report.passed {
        Ok(report)
    } else {
        Err(SemStoreError::ValidationFailed {
            score: report.score,
            issues: report.issues,
        })
    }
}
