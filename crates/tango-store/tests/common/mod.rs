use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tango_store::{DictionaryArchive, SqliteStore};
use zip::write::SimpleFileOptions;

/// Build an in-memory zip with the given (name, content) entries, in order
#[allow(dead_code)]
pub fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("start zip entry");
        writer
            .write_all(content.as_bytes())
            .expect("write zip entry");
    }
    writer.finish().expect("finish zip").into_inner()
}

/// Open an in-memory archive built from `entries`
#[allow(dead_code)]
pub fn archive(entries: &[(&str, &str)]) -> DictionaryArchive<Cursor<Vec<u8>>> {
    DictionaryArchive::from_reader(Cursor::new(build_zip(entries)), "test.zip")
        .expect("open in-memory archive")
}

/// Write a zip to `dir/name` and return its path
#[allow(dead_code)]
pub fn write_zip(dir: &Path, name: &str, entries: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_zip(entries)).expect("write zip file");
    path
}

/// Fresh in-memory store with schema applied
#[allow(dead_code)]
pub fn setup_store() -> SqliteStore {
    let mut store = SqliteStore::open_in_memory().expect("open store");
    store.ensure_schema().expect("ensure schema");
    store
}

#[allow(dead_code)]
pub fn count_rows(store: &SqliteStore, table: &str) -> i64 {
    store
        .connection()
        .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })
        .expect("count rows")
}

#[allow(dead_code)]
pub const T1_INDEX: &str = r#"{"title":"T1","format":3,"revision":"r1"}"#;
#[allow(dead_code)]
pub const T1_TERMS: &str = r#"[["犬","いぬ","","",0,["dog"],0,""]]"#;
