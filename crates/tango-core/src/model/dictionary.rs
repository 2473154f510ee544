use serde::{Deserialize, Serialize};

/// Dictionary attributes decoded from an archive's `index.json`
///
/// Built by the term decoder, which owns the wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryMeta {
    /// Human-readable name, unique across imported dictionaries
    pub title: String,

    /// Schema-version tag of the source package
    pub format: i64,

    /// Free-text revision string
    pub revision: String,

    /// Whether entries carry a meaningful sequence ordering
    pub sequenced: bool,
}

impl DictionaryMeta {
    pub fn new(title: impl Into<String>, format: i64, revision: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            format,
            revision: revision.into(),
            sequenced: false,
        }
    }
}

/// A dictionary row as persisted by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dictionary {
    /// Surrogate id assigned on insert
    pub id: i64,
    pub title: String,
    pub format: i64,
    pub revision: String,
    pub sequenced: bool,
}

impl Dictionary {
    /// Attach a store-assigned id to decoded metadata
    pub fn from_meta(id: i64, meta: DictionaryMeta) -> Self {
        Self {
            id,
            title: meta.title,
            format: meta.format,
            revision: meta.revision,
            sequenced: meta.sequenced,
        }
    }
}
