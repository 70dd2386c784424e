//! Structural diff between two semantic snapshots.
//!
//! ## Entry point
//!
//! ```
//! use semstore_core::diff::{compute_diff, render_human_summary};
//! use semstore_core::model::SemanticSnapshot;
//!
//! let a = SemanticSnapshot::default();
//! let diff = compute_diff(&a, &a);
//! assert!(diff.is_empty());
//! let _markdown = render_human_summary(&diff);
//! ```
//!
//! ## Guarantees
//!
//! - **Keyed, not positional**: elements are matched by `id` at every level,
//!   so reordering an input array never produces a change.
//! - **Timestamp noise suppression**: `createdAt`/`updatedAt` differences on
//!   business objects are never reported.
//! - **Deterministic output**: every list in the result is sorted by id.
//! - **Pure**: no side effects, no hidden state.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::compute_diff;
pub use human_summary::render_human_summary;
pub use model::{
    DiffSummary, EntityChanges, FieldChanges, FieldModification, ModifiedEntities,
    ObjectModification, VersionDiff,
};
