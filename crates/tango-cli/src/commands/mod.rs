pub mod define;
pub mod import;
pub mod list;

use std::path::Path;
use tango_store::SqliteStore;

/// Open the store at `db_path` with the schema in place
pub fn open_store(db_path: &Path) -> Result<SqliteStore, Box<dyn std::error::Error>> {
    let mut store = SqliteStore::open(db_path)?;
    store.ensure_schema()?;
    Ok(store)
}
