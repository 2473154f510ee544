//! Lookup service
//!
//! The single read path used by the CLI.

use crate::errors::Result;
use crate::repo::SqliteStore;
use tango_core::Term;

/// All terms whose headword or reading is exactly `word`
pub fn define(store: &SqliteStore, word: &str) -> Result<Vec<Term>> {
    store.find_terms(word)
}
