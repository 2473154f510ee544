//! Error handling for tango-store
//!
//! Wraps the tango-core ExError with store-specific helpers

use tango_core::errors::{ExError, ExErrorKind, TangoError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
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

/// A term row was rejected by the database inside an import transaction
pub fn term_insert_failed(row: usize, expression: &str, err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("insert_terms")
        .with_entity_id(expression.to_string())
        .with_row(row)
        .with_message(format!("Term insert failed: {}", err))
}

/// Archive path does not exist
pub fn archive_not_found(path: &str) -> ExError {
    TangoError::NotFound {
        path: path.to_string(),
    }
    .into()
}

/// File exists but could not be parsed as a zip container
pub fn not_a_zip(path: &str, err: zip::result::ZipError) -> ExError {
    TangoError::NotAZip {
        path: path.to_string(),
        reason: err.to_string(),
    }
    .into()
}

/// An entry could not be located or decompressed
pub fn corrupt_archive(entry: &str, reason: impl std::fmt::Display) -> ExError {
    TangoError::CorruptArchive {
        entry: entry.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
