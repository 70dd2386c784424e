//! Version invariants and working-copy completeness checks.

pub mod invariants;
pub mod validation;

pub use invariants::{find_violations, Violation};
pub use validation::{
    ensure_publishable, validate_versions, validate_working_copy, ValidationReport,
    PASS_THRESHOLD,
};
