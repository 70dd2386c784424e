//! Error handling for semstore-store
//!
//! Wraps semstore-core ExError with store-specific helpers

use semstore_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error for an already-applied migration
pub fn migration_checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::InvariantViolation)
        .with_op("migration_checksum")
        .with_entity_id(migration_id)
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create an error for a stored payload whose checksum no longer matches
pub fn payload_corrupted(key: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("load_record")
        .with_entity_id(key)
        .with_message(format!(
            "Stored payload checksum mismatch: expected {}, got {}",
            expected, actual
        ))
}

/// Create an error for a record key that cannot be stored
pub fn invalid_key(key: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("record_key")
        .with_entity_id(key)
        .with_message("record keys must be non-empty ASCII letters, digits, '_' or '-'")
}

/// Create a configuration error for a backend missing its path
pub fn missing_path(backend: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("open_record_store")
        .with_message(format!("storage backend '{}' requires a path", backend))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
