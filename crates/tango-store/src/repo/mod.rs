//! Repository layer persisting dictionaries and terms to SQLite

mod glossary;
pub mod sqlite_store;

pub use sqlite_store::{ImportTx, SqliteStore};
