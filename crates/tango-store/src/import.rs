//! Import pipeline
//!
//! Archive reader → term decoder → store, as one all-or-nothing unit:
//!
//! ```text
//! Start → MetadataRead → DuplicateCheck → TermsDecoded → Committed
//!                │               │               │
//!                └───────────────┴───────────────┴──────→ RolledBack
//! ```
//!
//! Failures before `DuplicateCheck` never touch the store. Failures after it
//! roll back the open transaction, so the store is left exactly as it was.

use crate::archive::DictionaryArchive;
use crate::errors::Result;
use crate::repo::{ImportTx, SqliteStore};
use std::io::{Read, Seek};
use std::path::Path;
use std::time::Instant;
use tango_core::decode::{decode_index, decode_term_bank};
use tango_core::{log_op_end, log_op_error, log_op_start};
use tango_core::TermEntry;

/// Stages of a single import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    Start,
    MetadataRead,
    DuplicateCheck,
    TermsDecoded,
    Committed,
    RolledBack,
}

impl ImportStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportStage::Start => "start",
            ImportStage::MetadataRead => "metadata_read",
            ImportStage::DuplicateCheck => "duplicate_check",
            ImportStage::TermsDecoded => "terms_decoded",
            ImportStage::Committed => "committed",
            ImportStage::RolledBack => "rolled_back",
        }
    }
}

/// Outcome of a successful import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub dictionary_id: i64,
    pub title: String,
    pub term_count: usize,
}

/// Import the package at `path`
pub fn import_dictionary(store: &mut SqliteStore, path: &Path) -> Result<ImportReport> {
    let start = Instant::now();
    log_op_start!("import_dictionary", path = %path.display());

    let result = DictionaryArchive::open(path).and_then(|archive| run(store, archive));
    log_outcome(&result, start);
    result
}

/// Import an already opened package
pub fn import_archive<R: Read + Seek>(
    store: &mut SqliteStore,
    archive: DictionaryArchive<R>,
) -> Result<ImportReport> {
    let start = Instant::now();
    log_op_start!("import_dictionary", path = archive.source());

    let result = run(store, archive);
    log_outcome(&result, start);
    result
}

fn log_outcome(result: &Result<ImportReport>, start: Instant) {
    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    match result {
        Ok(report) => log_op_end!(
            "import_dictionary",
            duration_ms = duration_ms,
            dict_id = report.dictionary_id,
            dict_title = %report.title,
            term_count = report.term_count
        ),
        Err(e) => log_op_error!("import_dictionary", e.clone(), duration_ms = duration_ms),
    }
}

fn enter(stage: ImportStage) {
    tracing::debug!(stage = stage.as_str(), "import stage");
}

fn run<R: Read + Seek>(
    store: &mut SqliteStore,
    mut archive: DictionaryArchive<R>,
) -> Result<ImportReport> {
    enter(ImportStage::Start);

    let meta = decode_index(&archive.index()?)?;
    enter(ImportStage::MetadataRead);

    let tx = store.begin_import(&meta)?;
    enter(ImportStage::DuplicateCheck);

    match load_terms(&mut archive, &tx) {
        Ok(term_count) => {
            let dictionary = tx.commit()?;
            enter(ImportStage::Committed);
            Ok(ImportReport {
                dictionary_id: dictionary.id,
                title: dictionary.title,
                term_count,
            })
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback() {
                tracing::warn!(error = %rollback_err, "rollback after failed import also failed");
            }
            enter(ImportStage::RolledBack);
            Err(e)
        }
    }
}

/// Decode every term bank into one batch, then insert it
fn load_terms<R: Read + Seek>(
    archive: &mut DictionaryArchive<R>,
    tx: &ImportTx<'_>,
) -> Result<usize> {
    let mut batch: Vec<TermEntry> = Vec::new();
    for entry in archive.term_banks() {
        let entry = entry?;
        let terms = decode_term_bank(&entry.name, &entry.bytes)?;
        tracing::debug!(entry = %entry.name, rows = terms.len(), "term bank decoded");
        batch.extend(terms);
    }
    enter(ImportStage::TermsDecoded);

    tx.insert_terms(&batch)
}
