//! Candidate Reducer: accept/reject decisions over suggested candidates.
//!
//! A best-effort UI-state derivation, not a transactional store: nothing in
//! here fails, and unknown ids are ignored.

pub mod records;
pub mod reducer;

pub use reducer::{derive_working_copy, CandidateReducer};
