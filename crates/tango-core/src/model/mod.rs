pub mod dictionary;
pub mod term;

pub use dictionary::{Dictionary, DictionaryMeta};
pub use term::{Term, TermEntry};
