//! SQLite-backed dictionary store
//!
//! Owns the connection for its whole lifetime. Imports go through
//! [`SqliteStore::begin_import`], which hands out an [`ImportTx`] bound to a
//! single freshly inserted dictionary row; nothing becomes visible to lookups
//! until that transaction commits.

use crate::db;
use crate::errors::{from_rusqlite, term_insert_failed, Result};
use crate::migrations;
use crate::repo::glossary;
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::path::Path;
use std::time::Instant;
use tango_core::{log_op_end, log_op_error, log_op_start};
use tango_core::{Dictionary, DictionaryMeta, TangoError, Term, TermEntry};

const INSERT_DICT_SQL: &str =
    "INSERT INTO dicts (title, format, revision, sequenced) VALUES (?1, ?2, ?3, ?4)";

const INSERT_TERM_SQL: &str = "INSERT INTO terms
    (expression, reading, definition_tags, rules, score, glossary, sequence, term_tags, dict_id)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

// Tag columns are cast because databases from older releases declare
// term_tags INTEGER, which stores digit-only tag strings as integers.
const FIND_TERMS_SQL: &str = "SELECT t.expression, t.reading,
        CAST(t.definition_tags AS TEXT), CAST(t.rules AS TEXT),
        t.score, t.glossary, t.sequence, CAST(t.term_tags AS TEXT), d.title
    FROM terms t
    JOIN dicts d ON t.dict_id = d.id
    WHERE t.expression = ?1 OR t.reading = ?1
    ORDER BY t.id ASC";

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Dictionary store over a single SQLite connection
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating if needed) the database file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            conn: db::open(path)?,
        })
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: db::open_in_memory()?,
        })
    }

    /// Release the connection, surfacing any error from closing it
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| from_rusqlite(e))
    }

    /// Read access to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Create tables and indexes if absent. Safe to call on every start.
    pub fn ensure_schema(&mut self) -> Result<()> {
        let start = Instant::now();
        log_op_start!("ensure_schema");

        match migrations::apply_migrations(&mut self.conn) {
            Ok(applied) => {
                log_op_end!(
                    "ensure_schema",
                    duration_ms = elapsed_ms(start),
                    applied_count = applied.len()
                );
                Ok(())
            }
            Err(e) => {
                log_op_error!("ensure_schema", e.clone(), duration_ms = elapsed_ms(start));
                Err(e)
            }
        }
    }

    /// Look up a stored dictionary by exact title
    pub fn find_dictionary(&self, title: &str) -> Result<Option<Dictionary>> {
        self.conn
            .query_row(
                "SELECT id, title, format, revision, sequenced FROM dicts WHERE title = ?1
                 ORDER BY id ASC LIMIT 1",
                [title],
                dictionary_from_row,
            )
            .optional()
            .map_err(from_rusqlite)
    }

    /// Start importing a dictionary
    ///
    /// Fails with `DuplicateDictionary` before any transaction is opened when
    /// the title is already stored. Otherwise opens an IMMEDIATE transaction
    /// (taking the write lock up front) and inserts the dictionary row.
    ///
    /// The title check runs outside the transaction, so it is only sound with
    /// a single writer.
    pub fn begin_import(&mut self, meta: &DictionaryMeta) -> Result<ImportTx<'_>> {
        if self.find_dictionary(&meta.title)?.is_some() {
            return Err(TangoError::DuplicateDictionary {
                title: meta.title.clone(),
            }
            .into());
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(from_rusqlite)?;

        tx.execute(
            INSERT_DICT_SQL,
            rusqlite::params![meta.title, meta.format, meta.revision, meta.sequenced],
        )
        .map_err(from_rusqlite)?;
        let id = tx.last_insert_rowid();

        tracing::debug!(dict_id = id, dict_title = %meta.title, "dictionary row inserted");

        Ok(ImportTx {
            tx,
            dictionary: Dictionary::from_meta(id, meta.clone()),
        })
    }

    /// All stored dictionaries, ascending by id
    pub fn list_dictionaries(&self) -> Result<Vec<Dictionary>> {
        let start = Instant::now();
        log_op_start!("list_dictionaries");

        let result = self.query_dictionaries();
        match &result {
            Ok(dicts) => log_op_end!(
                "list_dictionaries",
                duration_ms = elapsed_ms(start),
                dict_count = dicts.len()
            ),
            Err(e) => log_op_error!(
                "list_dictionaries",
                e.clone(),
                duration_ms = elapsed_ms(start)
            ),
        }
        result
    }

    /// Terms whose expression or reading equals `query` exactly
    ///
    /// Results span every dictionary and come back in import order.
    pub fn find_terms(&self, query: &str) -> Result<Vec<Term>> {
        let start = Instant::now();
        log_op_start!("find_terms", query = query);

        let result = self.query_terms(query);
        match &result {
            Ok(terms) => log_op_end!(
                "find_terms",
                duration_ms = elapsed_ms(start),
                hit_count = terms.len()
            ),
            Err(e) => log_op_error!("find_terms", e.clone(), duration_ms = elapsed_ms(start)),
        }
        result
    }

    fn query_dictionaries(&self) -> Result<Vec<Dictionary>> {
        let mut stmt = self
            .conn
            .prepare_cached(
                "SELECT id, title, format, revision, sequenced FROM dicts ORDER BY id ASC",
            )
            .map_err(from_rusqlite)?;

        let dicts = stmt
            .query_map([], dictionary_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(dicts)
    }

    fn query_terms(&self, query: &str) -> Result<Vec<Term>> {
        let mut stmt = self
            .conn
            .prepare_cached(FIND_TERMS_SQL)
            .map_err(from_rusqlite)?;

        let rows = stmt
            .query_map([query], |row| {
                let entry = TermEntry {
                    expression: row.get(0)?,
                    reading: row.get(1)?,
                    definition_tags: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    rules: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                    score: row.get::<_, Option<i64>>(4)?.unwrap_or_default(),
                    glossary: Vec::new(),
                    sequence: row.get::<_, Option<i64>>(6)?.unwrap_or_default(),
                    term_tags: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
                };
                let stored_glossary: String = row.get(5)?;
                let dictionary: String = row.get(8)?;
                Ok((entry, stored_glossary, dictionary))
            })
            .map_err(from_rusqlite)?;

        let mut terms = Vec::new();
        for row in rows {
            let (entry, stored_glossary, dictionary) = row.map_err(from_rusqlite)?;
            let glossary = glossary::decode(&entry.expression, &stored_glossary)?;
            terms.push(Term {
                entry: TermEntry { glossary, ..entry },
                dictionary,
            });
        }

        Ok(terms)
    }
}

fn dictionary_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Dictionary> {
    Ok(Dictionary {
        id: row.get(0)?,
        title: row.get(1)?,
        format: row.get::<_, Option<i64>>(2)?.unwrap_or_default(),
        revision: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        sequenced: row.get::<_, Option<bool>>(4)?.unwrap_or(false),
    })
}

/// An open import transaction bound to one new dictionary
///
/// Dropping it without calling [`ImportTx::commit`] rolls everything back,
/// including the dictionary row.
pub struct ImportTx<'conn> {
    tx: Transaction<'conn>,
    dictionary: Dictionary,
}

impl ImportTx<'_> {
    /// Insert a batch of terms owned by this transaction's dictionary
    ///
    /// Stops at the first failing row; the error carries that row's position
    /// within `terms`. The caller must then roll back.
    pub fn insert_terms(&self, terms: &[TermEntry]) -> Result<usize> {
        let mut stmt = self
            .tx
            .prepare_cached(INSERT_TERM_SQL)
            .map_err(from_rusqlite)?;

        for (row, term) in terms.iter().enumerate() {
            let stored_glossary = glossary::encode(&term.glossary)?;
            stmt.execute(rusqlite::params![
                term.expression,
                term.reading,
                term.definition_tags,
                term.rules,
                term.score,
                stored_glossary,
                term.sequence,
                term.term_tags,
                self.dictionary.id,
            ])
            .map_err(|e| term_insert_failed(row, &term.expression, e))?;
        }

        Ok(terms.len())
    }

    /// Make the dictionary and its terms visible
    pub fn commit(self) -> Result<Dictionary> {
        self.tx.commit().map_err(from_rusqlite)?;
        Ok(self.dictionary)
    }

    /// Discard the dictionary row and every term inserted so far
    pub fn rollback(self) -> Result<()> {
        self.tx.rollback().map_err(from_rusqlite)
    }
}
