//! Data directory resolution

use std::path::{Path, PathBuf};

const APP_DIR: &str = "tango";
const DB_FILE: &str = "tango.db";

/// Where the database lives when `--db` is not given
///
/// `$XDG_DATA_HOME/tango` if set and non-empty, else `~/.local/share/tango`.
/// The directory is created if missing.
pub fn default_db_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let xdg = std::env::var("XDG_DATA_HOME").ok();
    let dir = resolve_data_dir(xdg.as_deref(), dirs::home_dir())
        .ok_or("cannot determine data directory: neither XDG_DATA_HOME nor HOME is set")?;

    std::fs::create_dir_all(&dir)?;
    Ok(dir.join(DB_FILE))
}

/// Create the directory that will hold an explicitly chosen database file
pub fn ensure_parent_dir(db_path: &Path) -> std::io::Result<()> {
    match db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

pub fn resolve_data_dir(xdg_data_home: Option<&str>, home: Option<PathBuf>) -> Option<PathBuf> {
    match xdg_data_home {
        Some(xdg) if !xdg.is_empty() => Some(PathBuf::from(xdg).join(APP_DIR)),
        _ => home.map(|h| h.join(".local").join("share").join(APP_DIR)),
    }
}
