//! Tango CLI
//!
//! Command-line dictionary lookup over imported lexicon archives

use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use tango_core::logging_facility::{self, Profile};

mod commands;
mod paths;

#[derive(Debug, Parser)]
#[command(name = "tango", version)]
#[command(about = "Tango - offline dictionary lookup", long_about = None)]
struct Cli {
    /// Word to look up, matched exactly against headwords and readings
    word: Option<String>,

    /// List all imported dictionaries
    #[arg(short, long)]
    list: bool,

    /// Import a dictionary zip archive
    #[arg(short, long, value_name = "ZIP")]
    import: Option<PathBuf>,

    /// Database file (defaults to tango.db in the data directory)
    #[arg(long, value_name = "PATH", env = "TANGO_DB")]
    db: Option<PathBuf>,

    /// Human-readable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(if cli.verbose {
        Profile::Development
    } else {
        Profile::Production
    });

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.word.is_none() && cli.import.is_none() && !cli.list {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    let db_path = match cli.db {
        Some(path) => {
            paths::ensure_parent_dir(&path)?;
            path
        }
        None => paths::default_db_path()?,
    };

    if let Some(word) = cli.word {
        commands::define::execute(&db_path, &word)
    } else if let Some(archive) = cli.import {
        commands::import::execute(&db_path, &archive)
    } else {
        commands::list::execute(&db_path)
    }
}
