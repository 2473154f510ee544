//! Tango Core - dictionary domain model and pure decoding
//!
//! This crate provides the foundational pieces shared by the store and the CLI:
//! - Dictionary and term models
//! - The term decoder for `index.json` and `term_bank_*.json` payloads
//! - The error facility (domain taxonomy plus structured `ExError`)
//! - The structured logging facility
//!
//! Nothing in here performs I/O.

pub mod decode;
pub mod errors;
pub mod logging_facility;
pub mod model;

// Re-export commonly used types
pub use decode::{decode_index, decode_term_bank, decode_term_row};
pub use errors::{ExError, ExErrorKind, Result, TangoError};
pub use model::{Dictionary, DictionaryMeta, Term, TermEntry};
