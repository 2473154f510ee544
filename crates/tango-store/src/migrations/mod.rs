//! Schema migrations
//!
//! Each embedded migration runs at most once per database. The
//! `schema_version` table remembers what ran and the checksum of its SQL.

mod embedded;
mod runner;

pub use runner::apply_migrations;
