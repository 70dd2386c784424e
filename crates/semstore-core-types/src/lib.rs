//! Core types shared across SemStore facilities
//!
//! Canonical field keys and event names used by the logging facility and by
//! every crate that emits boundary events.

pub mod schema;
