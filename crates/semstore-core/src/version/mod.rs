//! Version lifecycle kernel.
//!
//! [`VersionLedger`] is the ordered version collection plus its read indexes;
//! [`apply`] is the only way to change it. Every command takes the ledger by
//! value and returns either a new ledger that satisfies all version
//! invariants or an error, in which case the caller's previous ledger is
//! still the current state.

pub mod apply;
pub mod commands;
pub mod ledger;
pub mod numbering;

pub use apply::{apply, compare};
pub use commands::VersionCommand;
pub use ledger::VersionLedger;
pub use numbering::next_version_number;
