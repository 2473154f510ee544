//! Tango Store - archive import and lookup over SQLite
//!
//! Provides:
//! - Archive reader for zipped lexicon packages
//! - SQLite schema with an embedded migrations framework
//! - Transactional dictionary import with a duplicate-title guard
//! - Exact headword/reading lookup

pub mod archive;
pub mod db;
pub mod errors;
pub mod import;
pub mod lookup;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use archive::{ArchiveEntry, DictionaryArchive};
pub use errors::Result;
pub use import::{import_archive, import_dictionary, ImportReport, ImportStage};
pub use lookup::define;
pub use repo::{ImportTx, SqliteStore};
