//! Archive reader for zipped lexicon packages
//!
//! A package holds one `index.json` and any number of `term_bank_*.json`
//! entries. Entries are decompressed lazily, one at a time.

use crate::errors::{archive_not_found, corrupt_archive, io_error, not_a_zip, Result};
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use tango_core::TangoError;
use zip::ZipArchive;

/// Name of the metadata entry
pub const INDEX_ENTRY: &str = "index.json";

/// Prefix shared by every term-bank entry
pub const TERM_BANK_PREFIX: &str = "term_bank_";

/// A decompressed archive entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// An opened lexicon package
pub struct DictionaryArchive<R = File> {
    archive: ZipArchive<R>,
    source: String,
}

impl DictionaryArchive<File> {
    /// Open a package from disk
    pub fn open(path: &Path) -> Result<Self> {
        let source = path.display().to_string();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => archive_not_found(&source),
            _ => io_error("open_archive", e),
        })?;
        Self::from_reader(file, source)
    }
}

impl<R: Read + Seek> DictionaryArchive<R> {
    /// Wrap any seekable reader; `source` names it in error messages
    pub fn from_reader(reader: R, source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let archive = ZipArchive::new(reader).map_err(|e| not_a_zip(&source, e))?;
        Ok(Self { archive, source })
    }

    /// Where this archive was read from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Decompressed content of `index.json`
    pub fn index(&mut self) -> Result<Vec<u8>> {
        let position = self.archive.index_for_name(INDEX_ENTRY).ok_or_else(|| {
            TangoError::InvalidMetadata {
                reason: format!("{} has no {} entry", self.source, INDEX_ENTRY),
            }
        })?;
        Ok(self.read_at(position, INDEX_ENTRY)?.bytes)
    }

    /// Lazily decompress every term-bank entry
    ///
    /// Each call starts again from the first term bank.
    pub fn term_banks(&mut self) -> TermBanks<'_, R> {
        let positions = self.term_bank_positions();
        TermBanks {
            archive: self,
            positions: positions.into_iter(),
        }
    }

    fn term_bank_positions(&self) -> Vec<usize> {
        (0..self.archive.len())
            .filter(|&i| {
                self.archive
                    .name_for_index(i)
                    .map(|name| name.starts_with(TERM_BANK_PREFIX) && !name.ends_with('/'))
                    .unwrap_or(false)
            })
            .collect()
    }

    fn read_at(&mut self, position: usize, name: &str) -> Result<ArchiveEntry> {
        let mut file = self
            .archive
            .by_index(position)
            .map_err(|e| corrupt_archive(name, e))?;

        let mut bytes = Vec::with_capacity(usize::try_from(file.size()).unwrap_or(0));
        file.read_to_end(&mut bytes)
            .map_err(|e| corrupt_archive(name, e))?;

        Ok(ArchiveEntry {
            name: file.name().to_string(),
            bytes,
        })
    }
}

/// Iterator over the term-bank entries of an archive
pub struct TermBanks<'a, R> {
    archive: &'a mut DictionaryArchive<R>,
    positions: std::vec::IntoIter<usize>,
}

impl<R: Read + Seek> Iterator for TermBanks<'_, R> {
    type Item = Result<ArchiveEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.positions.next()?;
        let name = self
            .archive
            .archive
            .name_for_index(position)
            .unwrap_or(TERM_BANK_PREFIX)
            .to_string();
        Some(self.archive.read_at(position, &name))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tango_core::ExErrorKind;
    use zip::write::SimpleFileOptions;

    fn build(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_index_and_term_banks_in_enumeration_order() {
        let bytes = build(&[
            ("term_bank_2.json", "[2]"),
            ("index.json", r#"{"title":"T"}"#),
            ("tag_bank_1.json", "[]"),
            ("term_bank_1.json", "[1]"),
        ]);
        let mut archive = DictionaryArchive::from_reader(Cursor::new(bytes), "mem").unwrap();

        assert_eq!(archive.index().unwrap(), br#"{"title":"T"}"#.to_vec());
        let banks: Vec<ArchiveEntry> = archive.term_banks().map(|e| e.unwrap()).collect();
        let names: Vec<&str> = banks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["term_bank_2.json", "term_bank_1.json"]);
        assert_eq!(banks[0].bytes, b"[2]".to_vec());
        assert_eq!(banks[1].bytes, b"[1]".to_vec());
    }

    #[test]
    fn test_term_banks_restartable() {
        let bytes = build(&[("index.json", "{}"), ("term_bank_1.json", "[]")]);
        let mut archive = DictionaryArchive::from_reader(Cursor::new(bytes), "mem").unwrap();

        assert_eq!(archive.term_banks().count(), 1);
        assert_eq!(archive.term_banks().count(), 1);
    }

    #[test]
    fn test_index_must_be_exact_name() {
        let bytes = build(&[("dict/index.json", "{}"), ("term_bank_1.json", "[]")]);
        let mut archive = DictionaryArchive::from_reader(Cursor::new(bytes), "mem").unwrap();

        let err = archive.index().unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidMetadata);
    }

    #[test]
    fn test_checksum_failure_is_corrupt_archive() {
        let content = r#"[["corrupt-me","x","","",0,[],0,""]]"#;
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let stored =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file("index.json", stored).unwrap();
        writer.write_all(b"{}").unwrap();
        writer.start_file("term_bank_1.json", stored).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
        let mut bytes = writer.finish().unwrap().into_inner();

        let at = bytes
            .windows(b"corrupt-me".len())
            .position(|w| w == b"corrupt-me")
            .unwrap();
        bytes[at] = b'C';

        let mut archive = DictionaryArchive::from_reader(Cursor::new(bytes), "mem").unwrap();
        let err = archive.term_banks().next().unwrap().unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::CorruptArchive);
        assert_eq!(err.entity_id(), Some("term_bank_1.json"));
    }

    #[test]
    fn test_not_a_zip() {
        let err = DictionaryArchive::from_reader(Cursor::new(b"plain text".to_vec()), "notes.txt")
            .err()
            .unwrap();
        assert_eq!(err.kind(), ExErrorKind::NotAZip);
        assert_eq!(err.entity_id(), Some("notes.txt"));
    }

    #[test]
    fn test_open_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = DictionaryArchive::open(&dir.path().join("missing.zip"))
            .err()
            .unwrap();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
    }
}
