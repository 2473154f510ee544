//! Dictionary import
//!
//! Usage: tango --import <ZIP>

use std::path::Path;

pub fn execute(db_path: &Path, archive: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = super::open_store(db_path)?;
    let report = tango_store::import_dictionary(&mut store, archive)?;
    store.close()?;

    println!(
        "import done: {} ({} terms)",
        report.title, report.term_count
    );
    Ok(())
}
