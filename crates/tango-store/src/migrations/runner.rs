use super::embedded::{Migration, MIGRATIONS};
use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, Result};
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};

const SCHEMA_VERSION_DDL: &str = "CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY,
    migration_id TEXT NOT NULL UNIQUE,
    applied_at INTEGER NOT NULL,
    checksum TEXT
)";

/// Bring the database schema up to date
///
/// Returns the ids of migrations applied by this call; empty when the schema
/// was already current. A migration whose recorded checksum differs from the
/// embedded SQL is an error and stops the run.
pub fn apply_migrations(conn: &mut Connection) -> Result<Vec<&'static str>> {
    conn.execute_batch(SCHEMA_VERSION_DDL)
        .map_err(from_rusqlite)?;

    let mut applied = Vec::new();
    for migration in MIGRATIONS {
        if apply_one(conn, migration)? {
            tracing::info!(migration_id = migration.id, "migration applied");
            applied.push(migration.id);
        }
    }
    Ok(applied)
}

/// Check and apply under one write lock; `false` when already recorded
fn apply_one(conn: &mut Connection, migration: &Migration) -> Result<bool> {
    let checksum = migration.checksum();
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)?;

    let recorded: Option<Option<String>> = tx
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?1",
            [migration.id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    match recorded {
        Some(Some(expected)) if expected != checksum => {
            return Err(checksum_mismatch(migration.id, &expected, &checksum));
        }
        Some(_) => return Ok(false),
        None => {}
    }

    tx.execute_batch(migration.sql)
        .map_err(|e| migration_error(migration.id, &e.to_string()))?;
    tx.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?1, ?2, ?3)",
        rusqlite::params![migration.id, chrono::Utc::now().timestamp(), checksum],
    )
    .map_err(from_rusqlite)?;
    tx.commit().map_err(from_rusqlite)?;

    Ok(true)
}
