//! Snapshot construction.
//!
//! Converts the loosely-typed business-object records owned by the modeling
//! editor into the canonical [`SemanticSnapshot`](crate::model::SemanticSnapshot).
//!
//! ## Entry point
//!
//! ```
//! use semstore_core::snapshot::{build_snapshot, IdAllocator};
//! use serde_json::json;
//!
//! let ids = IdAllocator::new();
//! let snapshot = build_snapshot(&[json!({"id": "bo1", "label": "Customer"})], &ids);
//! assert_eq!(snapshot.business_objects[0].id, "bo1");
//! ```
//!
//! Alias tolerance lives in [`record`] only; everything past the adapter is
//! strictly typed.

pub mod builder;
pub mod ids;
pub mod record;

pub use builder::build_snapshot;
pub use ids::IdAllocator;
pub use record::{RawBusinessObject, RawField};
