//! Atomic write primitives
//!
//! Uses temp→rename pattern to ensure no partial writes

use crate::errors::{io_error, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Atomically write bytes to a file
///
/// Writes a sibling `.tmp` file, syncs it, then renames it over the target.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_record_dir", e))?;
    }

    let temp_path = target_path.with_extension("tmp");

    let mut file = fs::File::create(&temp_path).map_err(|e| io_error("create_record_temp", e))?;
    file.write_all(content)
        .map_err(|e| io_error("write_record_temp", e))?;
    file.sync_all()
        .map_err(|e| io_error("sync_record_temp", e))?;
    drop(file);

    fs::rename(&temp_path, target_path).map_err(|e| io_error("rename_record_temp", e))?;

    Ok(())
}
