//! Dictionary listing
//!
//! Usage: tango --list

use std::io::Write;
use std::path::Path;
use tango_core::Dictionary;

pub fn execute(db_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let store = super::open_store(db_path)?;
    let dicts = store.list_dictionaries()?;
    store.close()?;

    let stdout = std::io::stdout();
    write_dictionaries(&mut stdout.lock(), &dicts)?;
    Ok(())
}

pub fn write_dictionaries(out: &mut impl Write, dicts: &[Dictionary]) -> std::io::Result<()> {
    if dicts.is_empty() {
        return writeln!(out, "There is no dictionary being imported yet.");
    }
    for d in dicts {
        writeln!(
            out,
            "[{}] {} Format: {}, Revision: {}",
            d.id, d.title, d.format, d.revision
        )?;
    }
    Ok(())
}
