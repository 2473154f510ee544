//! Core types shared across the tango facilities
//!
//! Holds the canonical schema constants used by both the error facility and
//! the logging facility, so every crate emits the same field keys.

pub mod schema;
