use crate::errors::{Result, SemStoreError};
use crate::model::{SemanticVersion, VersionNumber};

/// Number for the next draft
///
/// Computed from the highest version that was ever published (published or
/// deprecated): same major, next minor, patch zero. `1.0.0` when nothing has
/// been published yet. Drafts never contribute.
///
/// # Errors
///
/// `InvariantViolation` if the highest minor number cannot be incremented.
pub fn next_version_number(versions: &[SemanticVersion]) -> Result<VersionNumber> {
    let highest = versions
        .iter()
        .filter(|v| v.was_published())
        .map(|v| v.version)
        .max();

    match highest {
        Some(highest) => highest
            .next_minor()
            .ok_or_else(|| SemStoreError::InvariantViolation {
                details: format!("no minor version left after {}", highest),
            }),
        None => Ok(VersionNumber::INITIAL),
    }
}
